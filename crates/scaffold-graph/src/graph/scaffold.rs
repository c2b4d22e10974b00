//! Main ScaffoldGraph interface for editing the hierarchy.

use super::algorithms::{find_cycle, in_degrees, ChildIndex, ParentIndex};
use super::types::{
    Edge, EdgeData, EdgeId, GraphState, Node, NodeData, NodeId, NodeType, Position, ROOT_NODE_ID,
};
use crate::codec::{graph_to_tree, tree_to_graph};
use crate::error::{ImportError, Result, ScaffoldError};
use crate::sanitize::{ensure_root, parse_tree_import, read_tree_import};
use crate::tree::TreeNode;
use crate::validate::can_connect;
use crate::visibility::{initial_collapsed_for_import, CollapseSet, Visibility};
use log::{debug, info, trace};
use std::path::Path;
use uuid::Uuid;

/// The editable organizational graph.
///
/// `ScaffoldGraph` is the single owner of the flat `{nodes, edges}` state.
/// Every connection goes through [`can_connect`], so after any successful
/// mutation the graph is still a forest hanging off one root organization.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Default for ScaffoldGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaffoldGraph {
    /// Create a graph holding only the default root organization.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            edges: Vec::new(),
        }
    }

    /// Adopt an already sanitized state, repairing the root if needed.
    pub fn from_state(state: GraphState) -> Self {
        let GraphState { nodes, edges } = ensure_root(state);
        debug!("Adopting state with {} nodes and {} edges", nodes.len(), edges.len());
        Self { nodes, edges }
    }

    /// Build a graph by inflating tree documents.
    pub fn from_tree(roots: &[TreeNode]) -> Self {
        Self::from_state(tree_to_graph(roots))
    }

    /// Replace the whole graph with an imported tree document.
    ///
    /// Returns the collapse set the view should start from. On error the
    /// graph is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] if the text is not JSON or not a tree document.
    pub fn import_json(&mut self, raw: &str) -> std::result::Result<CollapseSet, ImportError> {
        let roots = parse_tree_import(raw)?;
        Ok(self.replace_with(&roots))
    }

    /// Like [`import_json`](Self::import_json), reading from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Unreadable`] if the file cannot be read.
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> std::result::Result<CollapseSet, ImportError> {
        let roots = read_tree_import(path)?;
        Ok(self.replace_with(&roots))
    }

    fn replace_with(&mut self, roots: &[TreeNode]) -> CollapseSet {
        *self = Self::from_tree(roots);
        info!(
            "Imported {} tree root(s): {} nodes, {} edges",
            roots.len(),
            self.nodes.len(),
            self.edges.len()
        );
        initial_collapsed_for_import(&self.nodes, &self.edges)
    }

    /// Snapshot of the flat state, as persisted.
    pub fn state(&self) -> GraphState {
        GraphState::new(self.nodes.clone(), self.edges.clone())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get the total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get a node by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::NodeNotFound`] if the node doesn't exist.
    pub fn get_node(&self, id: &str) -> Result<&Node> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| ScaffoldError::NodeNotFound {
                node_id: id.to_string(),
            })
    }

    fn get_node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ScaffoldError::NodeNotFound {
                node_id: id.to_string(),
            })
    }

    /// Get an edge by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::EdgeNotFound`] if the edge doesn't exist.
    pub fn get_edge(&self, id: &str) -> Result<&Edge> {
        self.edges
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ScaffoldError::EdgeNotFound {
                edge_id: id.to_string(),
            })
    }

    /// Parent of `node_id`, if it has one.
    pub fn parent_of(&self, node_id: &str) -> Option<&str> {
        self.edges
            .iter()
            .find(|e| e.target == node_id)
            .map(|e| e.source.as_str())
    }

    /// Number of direct children of `node_id`.
    pub fn child_count(&self, node_id: &str) -> usize {
        self.edges.iter().filter(|e| e.source == node_id).count()
    }

    /// Whether the graph already has its root organization.
    pub fn has_root_organization(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| n.is_root() && n.node_type() == NodeType::Organization)
    }

    /// Add an unconnected node with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidOperation`] for a second ORGANIZATION;
    /// the root organization is the only one a graph may hold.
    pub fn add_node(&mut self, node_type: NodeType, name: impl Into<String>, position: Position) -> Result<NodeId> {
        if node_type == NodeType::Organization && self.has_root_organization() {
            return Err(ScaffoldError::invalid("the graph already has a root organization"));
        }

        let node_id = format!("node-{}", Uuid::new_v4().simple());
        debug!("Adding node: id={node_id}, type={node_type}");
        self.nodes
            .push(Node::new(node_id.clone(), NodeData::new(node_type, name), position));
        Ok(node_id)
    }

    /// Replace the attributes of a node.
    ///
    /// The type may only change to one the node's current connections allow.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::NodeNotFound`] if the node doesn't exist
    /// - [`ScaffoldError::InvalidOperation`] if the root would stop being an
    ///   ORGANIZATION, another node would become one, or a USER would keep
    ///   children
    pub fn update_node_data(&mut self, id: &str, data: NodeData) -> Result<()> {
        let node = self.get_node(id)?;
        if node.is_root() && data.node_type != NodeType::Organization {
            return Err(ScaffoldError::invalid("the root node must stay an ORGANIZATION"));
        }
        if node.node_type() != NodeType::Organization && data.node_type == NodeType::Organization {
            return Err(ScaffoldError::invalid("the graph already has a root organization"));
        }
        if !data.node_type.can_have_children() && self.child_count(id) > 0 {
            return Err(ScaffoldError::invalid(format!(
                "{} nodes cannot have children",
                data.node_type
            )));
        }

        trace!("Updating data of node {id}");
        self.get_node_mut(id)?.data = data;
        Ok(())
    }

    /// Move a node on the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidOperation`] for the root node, which is
    /// pinned.
    pub fn set_position(&mut self, id: &str, position: Position) -> Result<()> {
        let node = self.get_node_mut(id)?;
        if !node.draggable {
            return Err(ScaffoldError::invalid(format!("node {id} cannot be moved")));
        }
        node.position = position;
        Ok(())
    }

    /// Delete a node and all its connected edges.
    ///
    /// Children of the node become top-level nodes; they are not re-attached.
    ///
    /// # Errors
    ///
    /// Returns error if the node doesn't exist or is the root.
    pub fn delete_node(&mut self, id: &str) -> Result<()> {
        if self.get_node(id)?.is_root() {
            return Err(ScaffoldError::invalid("the root organization cannot be deleted"));
        }

        debug!("Deleting node: id={id}");
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        trace!("Deleted {} connected edges for node {id}", before - self.edges.len());
        self.nodes.retain(|n| n.id != id);
        Ok(())
    }

    /// Connect `source` as the parent of `target`.
    ///
    /// # Returns
    ///
    /// The id of the new edge, `e-{source}-{target}`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Connection`] with the validator's reason if the
    /// edge would break the tree shape. The graph is unchanged in that case.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<EdgeId> {
        if let Err(rejection) = can_connect(source, target, &self.nodes, &self.edges) {
            debug!(
                "Rejected connection {source} -> {target}: {}",
                rejection.reason_code()
            );
            return Err(rejection.into());
        }

        let edge = Edge::new(source, target);
        let edge_id = edge.id.clone();
        debug!("Adding edge: id={edge_id}");
        self.edges.push(edge);
        Ok(edge_id)
    }

    /// Replace the attributes of an edge.
    ///
    /// A role is only kept when one endpoint is a USER.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::EdgeNotFound`] if the edge doesn't exist.
    pub fn update_edge_data(&mut self, id: &str, mut data: EdgeData) -> Result<()> {
        let edge = self.get_edge(id)?;
        let touches_user = [&edge.source, &edge.target].into_iter().any(|endpoint| {
            self.get_node(endpoint)
                .map(|n| n.node_type() == NodeType::User)
                .unwrap_or(false)
        });
        if !touches_user && data.role.take().is_some() {
            trace!("Dropping role on edge {id}: no USER endpoint");
        }

        let index = self.edges.iter().position(|e| e.id == id).ok_or_else(|| {
            ScaffoldError::EdgeNotFound {
                edge_id: id.to_string(),
            }
        })?;
        self.edges[index].data = data;
        Ok(())
    }

    /// Delete an edge.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::EdgeNotFound`] if the edge doesn't exist.
    pub fn delete_edge(&mut self, id: &str) -> Result<()> {
        debug!("Deleting edge: id={id}");
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        if self.edges.len() == before {
            return Err(ScaffoldError::EdgeNotFound {
                edge_id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Reset to a graph holding only the default root.
    pub fn clear(&mut self) {
        info!("Clearing graph ({} nodes)", self.nodes.len());
        *self = Self::new();
    }

    /// Visible subset for a collapse set.
    pub fn visibility(&self, collapsed: &CollapseSet) -> Visibility<'_> {
        Visibility::compute(&self.nodes, &self.edges, collapsed)
    }

    /// Fold the graph into tree documents.
    ///
    /// # Errors
    ///
    /// See [`graph_to_tree`].
    pub fn to_tree(&self) -> Result<Vec<TreeNode>> {
        graph_to_tree(&self.nodes, &self.edges)
    }

    /// Pretty-printed export document, `None` when there is nothing to export.
    ///
    /// # Errors
    ///
    /// See [`crate::export::export_json`].
    pub fn export_json(&self) -> Result<Option<String>> {
        crate::export::export_json(&self.nodes, &self.edges)
    }

    /// Check every structural invariant of the graph.
    ///
    /// Mutations through this type keep them; this is for states assembled
    /// by hand.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate_structure(&self) -> Result<()> {
        let root = self.get_node(ROOT_NODE_ID)?;
        if root.node_type() != NodeType::Organization || root.draggable {
            return Err(ScaffoldError::invalid("root node must be a pinned ORGANIZATION"));
        }

        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if self.get_node(endpoint).is_err() {
                    return Err(ScaffoldError::DanglingReference {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }

        let degrees = in_degrees(&self.nodes, &self.edges);
        if let Some(node) = self.nodes.iter().find(|n| degrees.get(n.id.as_str()).is_some_and(|d| *d > 1)) {
            return Err(ScaffoldError::MultipleParents {
                node_id: node.id.clone(),
            });
        }

        let parents = ParentIndex::build(&self.edges);
        let children = ChildIndex::build(&self.edges);
        for node in &self.nodes {
            if !node.node_type().can_have_parent() && parents.parent_of(&node.id).is_some() {
                return Err(ScaffoldError::invalid(format!("node {} cannot have a parent", node.id)));
            }
            if !node.node_type().can_have_children() && children.child_count(&node.id) > 0 {
                return Err(ScaffoldError::invalid(format!("node {} cannot have children", node.id)));
            }
        }

        if let Some(node_id) = find_cycle(&self.nodes, &self.edges) {
            return Err(ScaffoldError::CycleDetected {
                node_id: node_id.to_string(),
            });
        }
        Ok(())
    }
}
