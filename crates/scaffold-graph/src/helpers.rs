//! Convenience helpers for common hierarchy edits.
//!
//! This module builds on [`ScaffoldGraph`] to cut boilerplate for frequent
//! operations: adding a unit under a parent, adding people, and editing
//! attributes in place.

use crate::codec::LayoutOptions;
use crate::error::Result;
use crate::graph::{EdgeId, NodeId, NodeType, Position, ScaffoldGraph, UserMetadata, UserRole};
use log::debug;
use std::collections::HashSet;

/// Personal details for a new USER node.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserDetails<'a> {
    /// Display name
    pub name: &'a str,
    /// E-mail address
    pub email: Option<&'a str>,
    /// Given name
    pub firstname: Option<&'a str>,
    /// Family name
    pub lastname: Option<&'a str>,
    /// Access level
    pub role: Option<UserRole>,
}

/// Add a node and connect it under `parent_id`.
///
/// The node is placed one layout row below its parent, to the right of any
/// existing siblings. If the connection is refused the new node is removed
/// again and the graph is unchanged.
///
/// # Returns
///
/// The ID of the created node.
pub fn add_child(
    graph: &mut ScaffoldGraph,
    parent_id: &str,
    node_type: NodeType,
    name: &str,
) -> Result<NodeId> {
    let layout = LayoutOptions::default();
    let parent = graph.get_node(parent_id)?.position;
    let siblings = graph.child_count(parent_id) as f64;
    let position = Position::new(
        parent.x + siblings * (layout.leaf_width + layout.horizontal_gap),
        parent.y + layout.vertical_gap,
    );

    let child_id = graph.add_node(node_type, name, position)?;
    if let Err(e) = graph.connect(parent_id, &child_id) {
        debug!("Rolling back node {child_id}: {e}");
        graph.delete_node(&child_id)?;
        return Err(e);
    }
    Ok(child_id)
}

/// Add a USER node under `parent_id` with its personal details.
///
/// # Returns
///
/// The ID of the created user node.
pub fn add_user(graph: &mut ScaffoldGraph, parent_id: &str, details: UserDetails<'_>) -> Result<NodeId> {
    let user_id = add_child(graph, parent_id, NodeType::User, details.name)?;

    let mut data = graph.get_node(&user_id)?.data.clone();
    data.user_metadata = UserMetadata {
        email: details.email.map(str::to_string),
        firstname: details.firstname.map(str::to_string),
        lastname: details.lastname.map(str::to_string),
        role: details.role,
        ..UserMetadata::default()
    };
    graph.update_node_data(&user_id, data)?;

    Ok(user_id)
}

/// Set or replace one attached key/value pair on a node.
pub fn attach_data(graph: &mut ScaffoldGraph, node_id: &str, key: &str, value: &str) -> Result<()> {
    let mut data = graph.get_node(node_id)?.data.clone();
    data.attached_data.insert(key, value);
    graph.update_node_data(node_id, data)
}

/// Add an external organization id to a node.
///
/// # Returns
///
/// `false` if the id was blank or already present.
pub fn add_organization_id(graph: &mut ScaffoldGraph, node_id: &str, id: &str) -> Result<bool> {
    let mut data = graph.get_node(node_id)?.data.clone();
    if !data.organization_ids.push(id) {
        return Ok(false);
    }
    graph.update_node_data(node_id, data)?;
    Ok(true)
}

/// Set the role carried by an edge, keeping its other attributes.
///
/// The role is dropped again unless one endpoint is a USER.
pub fn assign_role(graph: &mut ScaffoldGraph, edge_id: &str, role: UserRole) -> Result<()> {
    let mut data = graph.get_edge(edge_id)?.data.clone();
    data.role = Some(role);
    graph.update_edge_data(edge_id, data)
}

/// Direct children of a node, in edge order.
pub fn get_children(graph: &ScaffoldGraph, node_id: &str) -> Result<Vec<NodeId>> {
    graph.get_node(node_id)?;
    Ok(graph
        .edges()
        .iter()
        .filter(|e| e.source == node_id)
        .map(|e| e.target.clone())
        .collect())
}

/// Chain of ancestors from the parent up to the top of the node's tree.
pub fn ancestors(graph: &ScaffoldGraph, node_id: &str) -> Result<Vec<NodeId>> {
    graph.get_node(node_id)?;

    let mut chain = Vec::new();
    let mut seen = HashSet::from([node_id.to_string()]);
    let mut current = node_id;
    while let Some(parent) = graph.parent_of(current) {
        if !seen.insert(parent.to_string()) {
            break;
        }
        chain.push(parent.to_string());
        current = parent;
    }
    Ok(chain)
}

/// Every node below `node_id`, in pre-order.
pub fn descendants(graph: &ScaffoldGraph, node_id: &str) -> Result<Vec<NodeId>> {
    let mut result = Vec::new();
    let mut visited = HashSet::from([node_id.to_string()]);
    let mut stack: Vec<NodeId> = get_children(graph, node_id)?.into_iter().rev().collect();

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        stack.extend(get_children(graph, &current)?.into_iter().rev());
        result.push(current);
    }
    Ok(result)
}

/// Edge connecting `parent_id` to `child_id`, if any.
pub fn edge_between(graph: &ScaffoldGraph, parent_id: &str, child_id: &str) -> Option<EdgeId> {
    graph
        .edges()
        .iter()
        .find(|e| e.source == parent_id && e.target == child_id)
        .map(|e| e.id.clone())
}
