//! Nested tree documents: the storage and exchange format.
//!
//! A document carries only domain attributes and structure. Empty optional
//! attributes and empty `children` lists are never written, which is what
//! makes `graph -> tree -> graph -> tree` stable.

use crate::graph::{AttachedData, NodeData, NodeType, OrganizationIds, UserMetadata};
use serde::{Deserialize, Serialize};

/// One node of a nested hierarchy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display label
    pub name: String,
    /// Type tag
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// External identifiers
    #[serde(default, skip_serializing_if = "OrganizationIds::is_empty")]
    pub organization_ids: OrganizationIds,
    /// Personal details (USER nodes)
    #[serde(default, skip_serializing_if = "UserMetadata::is_empty")]
    pub user_metadata: UserMetadata,
    /// Free-form key/value pairs
    #[serde(default, skip_serializing_if = "AttachedData::is_empty")]
    pub attached_data: AttachedData,
    /// Ordered children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf with only the required fields.
    pub fn new(node_type: NodeType, name: impl Into<String>) -> Self {
        Self::from_data(NodeData::new(node_type, name), Vec::new())
    }

    /// Builder pattern: append a child and return self.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Assemble a tree node from node attributes and already built children.
    pub fn from_data(data: NodeData, children: Vec<TreeNode>) -> Self {
        Self {
            name: data.name,
            node_type: data.node_type,
            organization_ids: data.organization_ids,
            user_metadata: data.user_metadata,
            attached_data: data.attached_data,
            children,
        }
    }

    /// Node attributes of this tree node, without its children.
    pub fn data(&self) -> NodeData {
        NodeData {
            name: self.name.clone(),
            node_type: self.node_type,
            organization_ids: self.organization_ids.clone(),
            user_metadata: self.user_metadata.clone(),
            attached_data: self.attached_data.clone(),
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// A whole exchange document: one tree, or an ordered list of trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeDocument {
    /// Exactly one root
    Single(TreeNode),
    /// Zero or several roots
    Forest(Vec<TreeNode>),
}

impl TreeDocument {
    /// Document for a list of roots: a bare object for one root, an array
    /// otherwise, nothing for an empty list.
    pub fn from_roots(mut roots: Vec<TreeNode>) -> Option<Self> {
        match roots.len() {
            0 => None,
            1 => roots.pop().map(TreeDocument::Single),
            _ => Some(TreeDocument::Forest(roots)),
        }
    }

    /// The roots in document order.
    pub fn roots(&self) -> &[TreeNode] {
        match self {
            TreeDocument::Single(root) => std::slice::from_ref(root),
            TreeDocument::Forest(roots) => roots,
        }
    }

    /// Consume the document, returning its roots.
    pub fn into_roots(self) -> Vec<TreeNode> {
        match self {
            TreeDocument::Single(root) => vec![root],
            TreeDocument::Forest(roots) => roots,
        }
    }
}
