//! Repair or synthesis of the distinguished root organization.

use crate::graph::{Edge, GraphState, Node, NodeType, ROOT_NODE_ID};
use log::{debug, info};
use std::collections::HashSet;

/// Make sure the graph has exactly one root organization at [`ROOT_NODE_ID`].
///
/// - a node already carrying the root id is pinned (not draggable) and forced
///   to type ORGANIZATION; later nodes reusing the id are dropped
/// - otherwise the first ORGANIZATION in node order is re-identified as the
///   root, and edges naming its old id are rewritten
/// - otherwise a synthetic root is prepended
///
/// In every case edges pointing into the root are removed.
pub fn ensure_root(state: GraphState) -> GraphState {
    let GraphState { nodes, mut edges } = state;

    let nodes = if nodes.iter().any(Node::is_root) {
        pin_existing_root(nodes)
    } else if let Some(index) = nodes
        .iter()
        .position(|n| n.node_type() == NodeType::Organization)
    {
        promote(nodes, &mut edges, index)
    } else {
        info!("No organization found; inserting a default root");
        let mut nodes = nodes;
        nodes.insert(0, Node::root());
        nodes
    };

    let before = edges.len();
    edges.retain(|e| e.target != ROOT_NODE_ID);
    if edges.len() != before {
        debug!("Dropped {} edge(s) pointing into the root", before - edges.len());
    }

    let mut seen = HashSet::new();
    edges.retain(|e| seen.insert(e.id.clone()));

    GraphState::new(nodes, edges)
}

fn pin_existing_root(nodes: Vec<Node>) -> Vec<Node> {
    let mut found = false;
    nodes
        .into_iter()
        .filter_map(|mut node| {
            if !node.is_root() {
                return Some(node);
            }
            if found {
                debug!("Dropping duplicate root node");
                return None;
            }
            found = true;
            node.draggable = false;
            node.data.node_type = NodeType::Organization;
            Some(node)
        })
        .collect()
}

fn promote(mut nodes: Vec<Node>, edges: &mut [Edge], index: usize) -> Vec<Node> {
    let old_id = std::mem::replace(&mut nodes[index].id, ROOT_NODE_ID.to_string());
    nodes[index].draggable = false;
    info!("Promoting organization {old_id} to root");

    for edge in edges.iter_mut() {
        if edge.source == old_id {
            edge.source = ROOT_NODE_ID.to_string();
        }
        if edge.target == old_id {
            edge.target = ROOT_NODE_ID.to_string();
        }
    }
    nodes
}
