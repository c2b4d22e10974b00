//! Core graph types: nodes, edges, IDs, and enums.

use super::attributes::{AttachedData, OrganizationIds};
use serde::{Deserialize, Serialize};

/// Opaque node identifier.
pub type NodeId = String;

/// Opaque edge identifier.
pub type EdgeId = String;

/// Fixed id of the distinguished root organization.
pub const ROOT_NODE_ID: &str = "node-root-organization";

/// Render-type discriminator stored on every node.
pub const NODE_RENDER_TYPE: &str = "scaffold";

/// Display name given to a synthesized root organization.
pub const DEFAULT_ROOT_NAME: &str = "Your Organization";

/// Type tag of a hierarchy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Top-level organization, never has a parent
    Organization,
    /// Network of sites
    Network,
    /// Hospital site
    Hospital,
    /// Medical practice
    Practice,
    /// Clinic
    Clinic,
    /// Hospital ward
    Ward,
    /// Room within a ward
    Room,
    /// Bed within a room
    Bed,
    /// Team of people
    Team,
    /// Person, never has children
    User,
    /// Role definition
    Role,
}

impl NodeType {
    /// Every type tag in palette order.
    pub const ALL: [NodeType; 11] = [
        NodeType::Organization,
        NodeType::Network,
        NodeType::Hospital,
        NodeType::Practice,
        NodeType::Clinic,
        NodeType::Ward,
        NodeType::Room,
        NodeType::Bed,
        NodeType::Team,
        NodeType::User,
        NodeType::Role,
    ];

    /// Wire tag, e.g. `"ORGANIZATION"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Organization => "ORGANIZATION",
            NodeType::Network => "NETWORK",
            NodeType::Hospital => "HOSPITAL",
            NodeType::Practice => "PRACTICE",
            NodeType::Clinic => "CLINIC",
            NodeType::Ward => "WARD",
            NodeType::Room => "ROOM",
            NodeType::Bed => "BED",
            NodeType::Team => "TEAM",
            NodeType::User => "USER",
            NodeType::Role => "ROLE",
        }
    }

    /// Parse a wire tag. Matching is exact (case-sensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        NodeType::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Whether nodes of this type may have children.
    pub fn can_have_children(&self) -> bool {
        *self != NodeType::User
    }

    /// Whether nodes of this type may have a parent.
    pub fn can_have_parent(&self) -> bool {
        *self != NodeType::Organization
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access level carried by user metadata and role-assignment edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Read-only access
    Viewer,
    /// Can moderate content
    Moderator,
    /// Full access
    Admin,
}

impl UserRole {
    /// Parse a wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "viewer" => Some(UserRole::Viewer),
            "moderator" => Some(UserRole::Moderator),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Plain containment
    Default,
    /// Reference to another unit
    Reference,
    /// Dependency on another unit
    Dependency,
}

impl ConnectionType {
    /// Parse a wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "default" => Some(ConnectionType::Default),
            "reference" => Some(ConnectionType::Reference),
            "dependency" => Some(ConnectionType::Dependency),
            _ => None,
        }
    }
}

/// Postal location of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocation {
    /// Street and number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl UserLocation {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.country.is_none()
    }
}

/// Personal details of a USER node. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    /// Access level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Postal location
    #[serde(default, skip_serializing_if = "UserLocation::is_empty")]
    pub location: UserLocation,
}

impl UserMetadata {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.firstname.is_none()
            && self.lastname.is_none()
            && self.role.is_none()
            && self.location.is_empty()
    }
}

/// Canvas coordinates. Layout only, never structural.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Domain attributes of a node.
///
/// Empty optional collections are omitted from JSON, so "empty" and "absent"
/// are the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
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
}

impl NodeData {
    /// Create data with only the required fields set.
    pub fn new(node_type: NodeType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type,
            organization_ids: OrganizationIds::new(),
            user_metadata: UserMetadata::default(),
            attached_data: AttachedData::new(),
        }
    }
}

fn default_render_type() -> String {
    NODE_RENDER_TYPE.to_string()
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// A node of the flat editing graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Render-type discriminator
    #[serde(rename = "type", default = "default_render_type")]
    pub render_type: String,
    /// Canvas position
    pub position: Position,
    /// Domain attributes
    pub data: NodeData,
    /// Whether the node may be repositioned (false for the root)
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub draggable: bool,
}

impl Node {
    /// Create a draggable node.
    pub fn new(id: impl Into<NodeId>, data: NodeData, position: Position) -> Self {
        Self {
            id: id.into(),
            render_type: default_render_type(),
            position,
            data,
            draggable: true,
        }
    }

    /// The synthetic root organization placed at the origin.
    pub fn root() -> Self {
        let mut node = Node::new(
            ROOT_NODE_ID,
            NodeData::new(NodeType::Organization, DEFAULT_ROOT_NAME),
            Position::default(),
        );
        node.draggable = false;
        node
    }

    /// Whether this is the distinguished root node.
    pub fn is_root(&self) -> bool {
        self.id == ROOT_NODE_ID
    }

    /// Shorthand for `self.data.node_type`.
    pub fn node_type(&self) -> NodeType {
        self.data.node_type
    }

    /// Shorthand for `self.data.name`.
    pub fn name(&self) -> &str {
        &self.data.name
    }
}

/// Optional attributes of an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Relationship kind
    #[serde(
        rename = "connectionType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_type: Option<ConnectionType>,
    /// Assigned role, meaningful when an endpoint is a USER
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Free-form key/value pairs
    #[serde(default, skip_serializing_if = "AttachedData::is_empty")]
    pub attributes: AttachedData,
}

impl EdgeData {
    /// True when nothing is set.
    pub fn is_empty(&self) -> bool {
        self.connection_type.is_none() && self.role.is_none() && self.attributes.is_empty()
    }
}

/// A directed parent -> child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,
    /// Parent node id
    pub source: NodeId,
    /// Child node id
    pub target: NodeId,
    /// Optional attributes
    #[serde(default, skip_serializing_if = "EdgeData::is_empty")]
    pub data: EdgeData,
}

impl Edge {
    /// Create an edge with the deterministic id `e-{source}-{target}`.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: Edge::id_for(&source, &target),
            source,
            target,
            data: EdgeData::default(),
        }
    }

    /// Deterministic edge id for a parent/child pair.
    pub fn id_for(source: &str, target: &str) -> EdgeId {
        format!("e-{source}-{target}")
    }

    /// Whether the edge touches `node_id` at either end.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// The flat graph as persisted: `{nodes, edges}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
    /// Edges in insertion order
    pub edges: Vec<Edge>,
}

impl GraphState {
    /// Create a state from parts.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// True when there are no nodes and no edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Find a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
