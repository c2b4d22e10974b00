//! Structural validation of proposed connections.
//!
//! [`can_connect`] is consulted before an edge is committed. It never mutates
//! anything; a refusal comes back as a [`ConnectionRejected`] value so the
//! caller can decide whether to show a banner (see
//! [`ConnectionRejected::is_conflict`]).

use crate::error::ConnectionRejected;
use crate::graph::algorithms::{is_reachable, ChildIndex};
use crate::graph::{Edge, Node};
use log::trace;

/// Decide whether `source -> target` may be added without breaking the
/// single-parent, acyclicity and type rules.
///
/// Checks run in a fixed order and the first failure wins:
/// self loop, unknown endpoint, USER source, ORGANIZATION target,
/// existing parent, cycle.
///
/// # Errors
///
/// Returns the [`ConnectionRejected`] reason for the first violated rule.
pub fn can_connect(
    source: &str,
    target: &str,
    nodes: &[Node],
    edges: &[Edge],
) -> Result<(), ConnectionRejected> {
    if source == target {
        return Err(ConnectionRejected::SelfLoop);
    }

    let source_node = find_node(nodes, source)?;
    let target_node = find_node(nodes, target)?;

    if !source_node.node_type().can_have_children() {
        return Err(ConnectionRejected::UserSource);
    }
    if !target_node.node_type().can_have_parent() {
        return Err(ConnectionRejected::OrganizationTarget);
    }

    if edges.iter().any(|e| e.target == target) {
        trace!("Rejecting {source} -> {target}: target already has a parent");
        return Err(ConnectionRejected::MultipleParents);
    }

    let children = ChildIndex::build(edges);
    if is_reachable(&children, target, source) {
        trace!("Rejecting {source} -> {target}: would close a cycle");
        return Err(ConnectionRejected::Cycle);
    }

    Ok(())
}

fn find_node<'a>(nodes: &'a [Node], id: &str) -> Result<&'a Node, ConnectionRejected> {
    nodes
        .iter()
        .find(|n| n.id == id)
        .ok_or_else(|| ConnectionRejected::UnknownNode {
            node_id: id.to_string(),
        })
}
