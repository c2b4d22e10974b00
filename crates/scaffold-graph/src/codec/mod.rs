//! Conversion between nested tree documents and the flat editing graph.
//!
//! - [`tree_to_graph`]: inflate documents into nodes and edges, assigning
//!   path-derived ids and a layered layout
//! - [`graph_to_tree`]: fold nodes and edges back into documents
//!
//! For any document without empty optional fields the two are inverse:
//! `graph_to_tree(tree_to_graph(t)) == t`.

mod layout;

pub use layout::{node_id_for_path, Extent, LayoutOptions};

use crate::error::{Result, ScaffoldError};
use crate::graph::algorithms::{find_cycle, in_degrees, ChildIndex};
use crate::graph::{Edge, GraphState, Node};
use crate::tree::TreeNode;
use layout::Placer;
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// Inflate tree documents into a flat graph using the default layout.
pub fn tree_to_graph(roots: &[TreeNode]) -> GraphState {
    tree_to_graph_with(roots, &LayoutOptions::default())
}

/// Inflate tree documents into a flat graph.
///
/// Nodes are emitted in pre-order. Every parent/child pair becomes an edge
/// with id `e-{parent}-{child}`.
pub fn tree_to_graph_with(roots: &[TreeNode], options: &LayoutOptions) -> GraphState {
    debug!("Inflating {} tree root(s) into a graph", roots.len());
    let mut placer = Placer::new(options);
    placer.place_roots(roots);
    trace!(
        "Inflated {} nodes and {} edges",
        placer.nodes.len(),
        placer.edges.len()
    );
    GraphState::new(placer.nodes, placer.edges)
}

/// Fold a flat graph into tree documents.
///
/// Roots are the nodes without incoming edges, in node-list order. Children
/// follow edge-insertion order. The walk keeps its own stack, so depth is
/// bounded by memory rather than the call stack.
///
/// # Errors
///
/// Nothing partial is returned when the graph is not a forest:
///
/// - [`ScaffoldError::DanglingReference`] if an edge names a missing node
/// - [`ScaffoldError::MultipleParents`] if a node has several incoming edges
/// - [`ScaffoldError::CycleDetected`] if some node is unreachable from every
///   root, which with single parents means it sits on or below a cycle
pub fn graph_to_tree(nodes: &[Node], edges: &[Edge]) -> Result<Vec<TreeNode>> {
    let mut by_id: HashMap<&str, &Node> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        by_id.entry(node.id.as_str()).or_insert(node);
    }

    for edge in edges {
        for endpoint in [&edge.source, &edge.target] {
            if !by_id.contains_key(endpoint.as_str()) {
                return Err(ScaffoldError::DanglingReference {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
    }

    let degrees = in_degrees(nodes, edges);
    if let Some(node) = nodes
        .iter()
        .find(|n| degrees.get(n.id.as_str()).is_some_and(|d| *d > 1))
    {
        return Err(ScaffoldError::MultipleParents {
            node_id: node.id.clone(),
        });
    }

    let children = ChildIndex::build(edges);
    let mut visited: HashSet<&str> = HashSet::with_capacity(by_id.len());
    let mut roots = Vec::new();

    for root in nodes.iter().filter(|n| degrees.get(n.id.as_str()) == Some(&0)) {
        if visited.insert(root.id.as_str()) {
            roots.push(fold_subtree(root, &by_id, &children, &mut visited)?);
        }
    }

    if visited.len() < by_id.len() {
        let node_id = find_cycle(nodes, edges)
            .or_else(|| nodes.iter().map(|n| n.id.as_str()).find(|id| !visited.contains(id)))
            .unwrap_or_default();
        return Err(ScaffoldError::CycleDetected {
            node_id: node_id.to_string(),
        });
    }

    debug!("Folded {} nodes into {} tree root(s)", nodes.len(), roots.len());
    Ok(roots)
}

/// A node whose children are still being folded.
struct Pending<'a> {
    node: &'a Node,
    next_child: usize,
    folded: Vec<TreeNode>,
}

fn fold_subtree<'a>(
    root: &'a Node,
    by_id: &HashMap<&'a str, &'a Node>,
    children: &ChildIndex<'a>,
    visited: &mut HashSet<&'a str>,
) -> Result<TreeNode> {
    let mut stack = vec![Pending {
        node: root,
        next_child: 0,
        folded: Vec::new(),
    }];

    let mut folded_root = None;
    while let Some(top) = stack.last_mut() {
        if let Some(&child_id) = children.children_of(top.node.id.as_str()).get(top.next_child) {
            top.next_child += 1;
            if !visited.insert(child_id) {
                return Err(ScaffoldError::CycleDetected {
                    node_id: child_id.to_string(),
                });
            }
            let node = by_id.get(child_id).copied().ok_or_else(|| ScaffoldError::NodeNotFound {
                node_id: child_id.to_string(),
            })?;
            stack.push(Pending {
                node,
                next_child: 0,
                folded: Vec::new(),
            });
            continue;
        }

        if let Some(done) = stack.pop() {
            let tree = TreeNode::from_data(done.node.data.clone(), done.folded);
            match stack.last_mut() {
                Some(parent) => parent.folded.push(tree),
                None => folded_root = Some(tree),
            }
        }
    }

    folded_root.ok_or_else(|| ScaffoldError::NodeNotFound {
        node_id: root.id.clone(),
    })
}
