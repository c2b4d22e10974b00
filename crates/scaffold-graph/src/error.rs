//! Error types for scaffold graph operations.
//!
//! All fallible operations return [`Result<T>`]. Connection attempts and file
//! imports have their own rejection types ([`ConnectionRejected`],
//! [`ImportError`]) because callers branch on them to pick a user-facing
//! message; both convert into [`ScaffoldError`] with `?`.

use thiserror::Error;

/// Result type alias for scaffold graph operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Comprehensive error type for all graph operations.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Storage backend error (RocksDB, file I/O, etc.)
    #[error("Storage error: {message}")]
    Storage {
        /// Detailed error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Node not found in the graph
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// ID of the missing node
        node_id: String,
    },

    /// Edge not found in the graph
    #[error("Edge not found: {edge_id}")]
    EdgeNotFound {
        /// ID of the missing edge
        edge_id: String,
    },

    /// An edge names a node that is not part of the node set.
    ///
    /// Seeing this during export means the in-memory graph was already
    /// inconsistent; no partial document is produced.
    #[error("Dangling reference: edge {edge_id} points at missing node {node_id}")]
    DanglingReference {
        /// Edge holding the stale reference
        edge_id: String,
        /// Node id that could not be resolved
        node_id: String,
    },

    /// A directed cycle was found while walking the hierarchy.
    #[error("Cycle detected at node {node_id}")]
    CycleDetected {
        /// A node on or below the cycle
        node_id: String,
    },

    /// A node has more than one incoming edge, so the graph is no tree.
    #[error("Node {node_id} has more than one parent")]
    MultipleParents {
        /// First node, in node order, with several parents
        node_id: String,
    },

    /// Invalid operation (e.g., deleting the root organization)
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of what went wrong
        message: String,
    },

    /// A connection attempt was refused by the structural validator
    #[error(transparent)]
    Connection(#[from] ConnectionRejected),

    /// An imported tree document was rejected
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ScaffoldError {
    /// Create a storage error from a message and optional source.
    pub fn storage<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Shorthand for [`ScaffoldError::InvalidOperation`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}

/// Reason a proposed edge was refused.
///
/// Only [`MultipleParents`](Self::MultipleParents) and [`Cycle`](Self::Cycle)
/// are conflicts worth telling the user about; everything else is a silent
/// refusal of the drop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionRejected {
    /// Source and target are the same node
    #[error("A node cannot be connected to itself")]
    SelfLoop,

    /// One of the endpoints is not in the graph
    #[error("Unknown node: {node_id}")]
    UnknownNode {
        /// The unresolved id
        node_id: String,
    },

    /// USER nodes never have children
    #[error("USER nodes cannot have children")]
    UserSource,

    /// ORGANIZATION nodes never have a parent
    #[error("ORGANIZATION nodes cannot have a parent")]
    OrganizationTarget,

    /// Target already has a parent
    #[error("Each node can have only one parent. The graph must stay a tree.")]
    MultipleParents,

    /// Source is reachable from target
    #[error("This connection would create a cycle. The graph must stay a tree.")]
    Cycle,
}

impl ConnectionRejected {
    /// Stable machine-readable code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ConnectionRejected::SelfLoop => "SELF_LOOP",
            ConnectionRejected::UnknownNode { .. } => "UNKNOWN_NODE",
            ConnectionRejected::UserSource => "USER_SOURCE",
            ConnectionRejected::OrganizationTarget => "ORGANIZATION_TARGET",
            ConnectionRejected::MultipleParents => "MULTIPLE_PARENTS",
            ConnectionRejected::Cycle => "CYCLE",
        }
    }

    /// Whether the rejection should surface as a banner message.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ConnectionRejected::MultipleParents | ConnectionRejected::Cycle
        )
    }
}

/// Failure classification for tree document imports.
///
/// An import either succeeds as a whole or fails with exactly one of these.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The payload is not syntactically valid JSON
    #[error("Invalid JSON: {source}")]
    InvalidJson {
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// The payload is JSON but not a tree document (or list of them)
    #[error("Invalid JSON or format.")]
    InvalidFormat,

    /// The file could not be read
    #[error("Failed to read file: {source}")]
    Unreadable {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    /// Stable machine-readable code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ImportError::InvalidJson { .. } => "INVALID_JSON",
            ImportError::InvalidFormat => "INVALID_FORMAT",
            ImportError::Unreadable { .. } => "UNREADABLE",
        }
    }
}
