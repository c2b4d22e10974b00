//! Index builders and traversal algorithms over flat node/edge lists.
//!
//! Every index is rebuilt from the edge list on demand instead of being
//! stored on the nodes, so deleting an edge can never leave a stale
//! back-pointer behind. All traversals are iterative and keep a visited set,
//! which bounds them to O(V + E) even on malformed input.

use crate::graph::{Edge, Node};
use std::collections::{HashMap, HashSet};

/// Child id -> parent id lookup.
///
/// When a child has several incoming edges (only possible in unsanitized
/// input) the last edge wins.
#[derive(Debug, Clone, Default)]
pub struct ParentIndex<'a> {
    parent_by_child: HashMap<&'a str, &'a str>,
}

impl<'a> ParentIndex<'a> {
    /// Build the index in O(E).
    pub fn build(edges: &'a [Edge]) -> Self {
        let mut parent_by_child = HashMap::with_capacity(edges.len());
        for edge in edges {
            parent_by_child.insert(edge.target.as_str(), edge.source.as_str());
        }
        Self { parent_by_child }
    }

    /// Parent of `node_id`, if any.
    pub fn parent_of(&self, node_id: &str) -> Option<&'a str> {
        self.parent_by_child.get(node_id).copied()
    }

    /// Number of nodes that have a parent.
    pub fn len(&self) -> usize {
        self.parent_by_child.len()
    }

    /// True when no edges were indexed.
    pub fn is_empty(&self) -> bool {
        self.parent_by_child.is_empty()
    }
}

/// Parent id -> child ids lookup, children in edge-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ChildIndex<'a> {
    children_by_parent: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> ChildIndex<'a> {
    /// Build the index in O(E).
    pub fn build(edges: &'a [Edge]) -> Self {
        let mut children_by_parent: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for edge in edges {
            children_by_parent
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
        Self { children_by_parent }
    }

    /// Children of `node_id` (empty for leaves and unknown ids).
    pub fn children_of(&self, node_id: &str) -> &[&'a str] {
        self.children_by_parent
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of children of `node_id`.
    pub fn child_count(&self, node_id: &str) -> usize {
        self.children_of(node_id).len()
    }
}

/// Incoming edge count per node. Every node in `nodes` gets an entry.
pub fn in_degrees<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> HashMap<&'a str, usize> {
    let mut degrees: HashMap<&str, usize> = nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
    for edge in edges {
        *degrees.entry(edge.target.as_str()).or_insert(0) += 1;
    }
    degrees
}

/// Depth-first reachability from `start` to `goal` along outgoing edges.
///
/// `start == goal` counts as reachable.
pub fn is_reachable(children: &ChildIndex<'_>, start: &str, goal: &str) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if current == goal {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        for child in children.children_of(current) {
            if !visited.contains(child) {
                stack.push(*child);
            }
        }
    }

    false
}

/// Find a node that lies on a directed cycle, if any.
///
/// Uses Kahn's algorithm: whatever cannot be peeled off by repeatedly
/// removing zero in-degree nodes sits on (or behind) a cycle. The returned id
/// is the first such node in `nodes` order.
pub fn find_cycle<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> Option<&'a str> {
    let children = ChildIndex::build(edges);
    let mut degrees = in_degrees(nodes, edges);
    let mut queue: Vec<&str> = nodes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| degrees.get(id) == Some(&0))
        .collect();

    let mut removed = HashSet::new();
    while let Some(current) = queue.pop() {
        if !removed.insert(current) {
            continue;
        }
        for child in children.children_of(current) {
            if let Some(degree) = degrees.get_mut(child) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    queue.push(*child);
                }
            }
        }
    }

    nodes
        .iter()
        .map(|n| n.id.as_str())
        .find(|id| !removed.contains(id))
}
