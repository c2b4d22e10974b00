//! Flat `{nodes, edges}` state read back from persistence.

use super::{
    check_attached_data, check_organization_ids, check_user_metadata, check_user_role, required_str,
    Check, Checked,
};
use crate::graph::{ConnectionType, Edge, EdgeData, GraphState, Node, NodeData, NodeType, Position};
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Check one candidate node.
///
/// Requires a string `id`, a string render `type`, a `data` object with a
/// string `name` and a known type tag, and a numeric `position`. Optional
/// attributes are type-checked when present.
pub fn check_node(value: &Value) -> Checked<Node> {
    node_from_value(value).into()
}

/// Check one candidate edge.
///
/// Requires string `id`, `source` and `target`. Optional `data` must use the
/// closed connection-type and role sets and a valid attribute list.
pub fn check_edge(value: &Value) -> Checked<Edge> {
    edge_from_value(value).into()
}

/// Coerce an arbitrary JSON value into a well-formed flat graph.
///
/// Never fails: a value that is not an object yields an empty state, and each
/// invalid element is dropped on its own. Repeated ids keep their first
/// occurrence, and edges whose endpoints did not survive are dropped too.
/// Applying this to its own (serialized) output returns the same state.
pub fn sanitize_loaded_state(value: &Value) -> GraphState {
    let Some(obj) = value.as_object() else {
        debug!("Stored state is not an object; starting empty");
        return GraphState::default();
    };

    let mut node_ids = HashSet::new();
    let mut nodes = Vec::new();
    for candidate in obj.get("nodes").and_then(Value::as_array).into_iter().flatten() {
        match check_node(candidate) {
            Checked::Valid(node) if node_ids.insert(node.id.clone()) => nodes.push(node),
            Checked::Valid(node) => debug!("Dropping duplicate node {}", node.id),
            Checked::Invalid(reason) => debug!("Dropping invalid node: {reason}"),
        }
    }

    let mut edge_ids = HashSet::new();
    let mut edges = Vec::new();
    for candidate in obj.get("edges").and_then(Value::as_array).into_iter().flatten() {
        match check_edge(candidate) {
            Checked::Valid(edge)
                if node_ids.contains(&edge.source) && node_ids.contains(&edge.target) =>
            {
                if edge_ids.insert(edge.id.clone()) {
                    edges.push(edge);
                } else {
                    debug!("Dropping duplicate edge {}", edge.id);
                }
            }
            Checked::Valid(edge) => debug!("Dropping edge {} with missing endpoint", edge.id),
            Checked::Invalid(reason) => debug!("Dropping invalid edge: {reason}"),
        }
    }

    GraphState::new(nodes, edges)
}

/// Parse and sanitize a raw persisted string.
///
/// Malformed JSON yields an empty state.
pub fn parse_stored_state(raw: &str) -> GraphState {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => sanitize_loaded_state(&value),
        Err(e) => {
            warn!("Discarding unparsable stored state: {e}");
            GraphState::default()
        }
    }
}

fn node_from_value(value: &Value) -> Check<Node> {
    let obj = value.as_object().ok_or("node is not an object")?;
    let id = required_str(obj, "id", "node id is not a string")?;
    let render_type = required_str(obj, "type", "node type is not a string")?;

    let data = obj
        .get("data")
        .and_then(Value::as_object)
        .ok_or("node data is not an object")?;
    let name = required_str(data, "name", "node name is not a string")?;
    let node_type = required_str(data, "type", "node data type is not a string")
        .and_then(|tag| NodeType::from_tag(tag).ok_or("unknown node type"))?;

    let position = obj
        .get("position")
        .and_then(Value::as_object)
        .ok_or("node position is not an object")?;
    let x = position.get("x").and_then(Value::as_f64).ok_or("position.x is not a number")?;
    let y = position.get("y").and_then(Value::as_f64).ok_or("position.y is not a number")?;

    let draggable = match obj.get("draggable") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => return Err("draggable is not a boolean"),
    };

    let node_data = NodeData {
        name: name.to_string(),
        node_type,
        organization_ids: check_organization_ids(data.get("organization_ids"))?,
        user_metadata: check_user_metadata(data.get("user_metadata"))?,
        attached_data: check_attached_data(data.get("attached_data"), "attached_data is not a list of string pairs")?,
    };

    let mut node = Node::new(id, node_data, Position::new(x, y));
    node.render_type = render_type.to_string();
    node.draggable = draggable;
    Ok(node)
}

fn edge_from_value(value: &Value) -> Check<Edge> {
    let obj = value.as_object().ok_or("edge is not an object")?;
    let id = required_str(obj, "id", "edge id is not a string")?;
    let source = required_str(obj, "source", "edge source is not a string")?;
    let target = required_str(obj, "target", "edge target is not a string")?;

    let data = match obj.get("data") {
        None | Some(Value::Null) => EdgeData::default(),
        Some(Value::Object(data)) => EdgeData {
            connection_type: match data.get("connectionType") {
                None | Some(Value::Null) => None,
                Some(tag) => Some(
                    tag.as_str()
                        .and_then(ConnectionType::from_tag)
                        .ok_or("unknown connection type")?,
                ),
            },
            role: check_user_role(data.get("role"))?,
            attributes: check_attached_data(data.get("attributes"), "edge attributes are not a list of string pairs")?,
        },
        Some(_) => return Err("edge data is not an object"),
    };

    Ok(Edge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        data,
    })
}
