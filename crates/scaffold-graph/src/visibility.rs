//! Collapse/expand and the derived visible view of the graph.
//!
//! The collapse set is an explicit, immutable value: toggling returns a new
//! set and never touches the graph. Visibility is then a pure function of
//! `(nodes, edges, collapsed)`.

use crate::graph::algorithms::{ChildIndex, ParentIndex};
use crate::graph::{Edge, Node, NodeId, ROOT_NODE_ID};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Set of node ids whose descendants are hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapseSet {
    ids: BTreeSet<NodeId>,
}

impl CollapseSet {
    /// Create an empty set (everything expanded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this set with `node_id` collapsed.
    #[must_use]
    pub fn collapse(&self, node_id: &str) -> Self {
        let mut next = self.clone();
        next.ids.insert(node_id.to_string());
        next
    }

    /// Copy of this set with `node_id` expanded.
    #[must_use]
    pub fn expand(&self, node_id: &str) -> Self {
        let mut next = self.clone();
        next.ids.remove(node_id);
        next
    }

    /// Copy of this set with `node_id` flipped.
    #[must_use]
    pub fn toggle(&self, node_id: &str) -> Self {
        if self.contains(node_id) {
            self.expand(node_id)
        } else {
            self.collapse(node_id)
        }
    }

    /// Copy of this set without ids that are not in `nodes`.
    #[must_use]
    pub fn retain_existing(&self, nodes: &[Node]) -> Self {
        let existing: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        Self {
            ids: self
                .ids
                .iter()
                .filter(|id| existing.contains(id.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Whether `node_id` is collapsed.
    pub fn contains(&self, node_id: &str) -> bool {
        self.ids.contains(node_id)
    }

    /// Number of collapsed nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is collapsed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate collapsed ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<NodeId>> FromIterator<S> for CollapseSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Whether `node_id` is visible under `collapsed`.
///
/// The root is always visible; a parentless node is visible; otherwise a node
/// is hidden as soon as any ancestor's parent link passes through a collapsed
/// node. Walks the parent chain iteratively and stops on a repeated id, so a
/// malformed cyclic chain cannot loop forever.
pub fn is_visible(node_id: &str, collapsed: &CollapseSet, parents: &ParentIndex<'_>) -> bool {
    let mut seen = HashSet::new();
    let mut current = node_id;
    loop {
        if current == ROOT_NODE_ID || !seen.insert(current) {
            return true;
        }
        match parents.parent_of(current) {
            None => return true,
            Some(parent) if collapsed.contains(parent) => return false,
            Some(parent) => current = parent,
        }
    }
}

/// Visible subset of a graph for one collapse set.
///
/// Computed once in O(V + E) with memoized parent-chain walks.
#[derive(Debug, Clone)]
pub struct Visibility<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    visible: HashSet<&'a str>,
}

impl<'a> Visibility<'a> {
    /// Compute the visible view.
    pub fn compute(nodes: &'a [Node], edges: &'a [Edge], collapsed: &CollapseSet) -> Self {
        let parents = ParentIndex::build(edges);
        let mut memo: HashMap<&'a str, bool> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            resolve(node.id.as_str(), collapsed, &parents, &mut memo);
        }

        let visible = nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| memo.get(id).copied().unwrap_or(true))
            .collect();

        Self {
            nodes,
            edges,
            visible,
        }
    }

    /// Whether `node_id` is visible. Unknown ids are not.
    pub fn is_visible(&self, node_id: &str) -> bool {
        self.visible.contains(node_id)
    }

    /// Visible nodes in graph order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.iter().filter(|n| self.visible.contains(n.id.as_str()))
    }

    /// Edges whose endpoints are both visible, in graph order.
    pub fn edges(&self) -> impl Iterator<Item = &'a Edge> + '_ {
        self.edges.iter().filter(|e| {
            self.visible.contains(e.source.as_str()) && self.visible.contains(e.target.as_str())
        })
    }

    /// Number of visible nodes.
    pub fn node_count(&self) -> usize {
        self.visible.len()
    }
}

/// Resolve one node and memoize every node on its walked chain.
///
/// Each chain member's parent was checked to be expanded, so they all share
/// the verdict reached at the end of the walk.
fn resolve<'a>(
    node_id: &'a str,
    collapsed: &CollapseSet,
    parents: &ParentIndex<'a>,
    memo: &mut HashMap<&'a str, bool>,
) -> bool {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = node_id;

    let verdict = loop {
        if let Some(&known) = memo.get(current) {
            break known;
        }
        if current == ROOT_NODE_ID || !seen.insert(current) {
            break true;
        }
        chain.push(current);
        match parents.parent_of(current) {
            None => break true,
            Some(parent) if collapsed.contains(parent) => break false,
            Some(parent) => current = parent,
        }
    };

    if current == ROOT_NODE_ID {
        memo.insert(current, true);
    }
    for id in chain {
        memo.insert(id, verdict);
    }
    verdict
}

/// Collapse set applied right after an import: everything except the root
/// and its direct children starts collapsed.
pub fn initial_collapsed_for_import(nodes: &[Node], edges: &[Edge]) -> CollapseSet {
    let root_children: HashSet<&str> = edges
        .iter()
        .filter(|e| e.source == ROOT_NODE_ID)
        .map(|e| e.target.as_str())
        .collect();

    nodes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| *id != ROOT_NODE_ID && !root_children.contains(id))
        .collect()
}

/// Number of direct children per node, for the expand/collapse affordance.
pub fn child_count(edges: &[Edge], node_id: &str) -> usize {
    ChildIndex::build(edges).child_count(node_id)
}
