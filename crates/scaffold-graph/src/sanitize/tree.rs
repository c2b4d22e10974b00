//! Nested tree documents supplied by the user for import.

use super::{check_attached_data, check_user_metadata, required_str, Check, Checked};
use crate::error::ImportError;
use crate::graph::{NodeData, NodeType, OrganizationIds};
use crate::tree::TreeNode;
use log::{debug, warn};
use serde_json::Value;
use std::path::Path;

/// Check one candidate tree node and, recursively, all of its children.
///
/// `name` and `type` are mandatory and `children`, when present, must be an
/// array of valid nodes. A USER node has no children and an ORGANIZATION
/// node only appears at the top level. Optional attributes are salvaged where possible: only
/// string organization ids are kept, and malformed `user_metadata` or
/// `attached_data` are dropped rather than failing the node.
pub fn check_tree_node(value: &Value) -> Checked<TreeNode> {
    tree_node_from_value(value).into()
}

/// Validate a parsed import document as a whole.
///
/// # Errors
///
/// [`ImportError::InvalidFormat`] unless the value is a valid tree object or a
/// non-empty array of them. A single bad node rejects the whole document.
pub fn sanitize_tree_document(value: &Value) -> Result<Vec<TreeNode>, ImportError> {
    let roots = match value {
        Value::Object(_) => vec![tree_node_from_value(value)],
        Value::Array(items) if !items.is_empty() => items.iter().map(tree_node_from_value).collect(),
        _ => {
            debug!("Import document is neither an object nor a non-empty array");
            return Err(ImportError::InvalidFormat);
        }
    };

    roots
        .into_iter()
        .collect::<Check<Vec<_>>>()
        .map_err(|reason| {
            debug!("Rejecting import document: {reason}");
            ImportError::InvalidFormat
        })
}

/// Parse raw import text and validate it.
///
/// # Errors
///
/// - [`ImportError::InvalidJson`] on a syntax error
/// - [`ImportError::InvalidFormat`] on a shape error
pub fn parse_tree_import(raw: &str) -> Result<Vec<TreeNode>, ImportError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| {
        warn!("Import is not valid JSON: {source}");
        ImportError::InvalidJson { source }
    })?;
    sanitize_tree_document(&value)
}

/// Read an import file from disk and validate it.
///
/// # Errors
///
/// [`ImportError::Unreadable`] if the file cannot be read, otherwise as
/// [`parse_tree_import`].
pub fn read_tree_import(path: impl AsRef<Path>) -> Result<Vec<TreeNode>, ImportError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| {
        warn!("Failed to read import file {}: {source}", path.display());
        ImportError::Unreadable { source }
    })?;
    parse_tree_import(&raw)
}

fn tree_node_from_value(value: &Value) -> Check<TreeNode> {
    let obj = value.as_object().ok_or("tree node is not an object")?;
    let name = required_str(obj, "name", "tree node name is not a string")?;
    let node_type = required_str(obj, "type", "tree node type is not a string")
        .and_then(|tag| NodeType::from_tag(tag).ok_or("unknown node type"))?;

    let children = match obj.get("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(tree_node_from_value).collect::<Check<Vec<_>>>()?,
        Some(_) => return Err("children is not an array"),
    };
    if !children.is_empty() && !node_type.can_have_children() {
        return Err("USER node cannot have children");
    }
    if children.iter().any(|child| !child.node_type.can_have_parent()) {
        return Err("ORGANIZATION node cannot be nested");
    }

    let organization_ids: OrganizationIds = obj
        .get("organization_ids")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let data = NodeData {
        name: name.to_string(),
        node_type,
        organization_ids,
        user_metadata: check_user_metadata(obj.get("user_metadata")).unwrap_or_default(),
        attached_data: check_attached_data(obj.get("attached_data"), "attached_data").unwrap_or_default(),
    };

    Ok(TreeNode::from_data(data, children))
}
