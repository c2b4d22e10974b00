//! # scaffold-graph
//!
//! A graph/tree consistency engine for organizational hierarchies:
//! organizations, networks, hospitals, wards, rooms, beds, teams, users and
//! roles.
//!
//! ## Core Principles
//!
//! - **Always a Tree**: Every connection is checked; a node has at most one
//!   parent and the graph never gains a cycle
//! - **Two Representations**: A flat graph for editing, a nested tree document
//!   for storage and exchange, converted losslessly both ways
//! - **Untrusted Input**: Persisted and imported JSON goes through an explicit
//!   schema check before it reaches the graph
//! - **Zero Magic**: Collapse state and options are explicit parameters
//!
//! ## Architecture
//!
//! ```text
//! Host (UI, file picker, timers)
//!     ↓
//! Helpers + Persistence (convenience API, debounced saves)
//!     ↓
//! ScaffoldGraph (editing facade)
//!     ↓
//! Validator · Visibility · Codec · Sanitizer
//!     ↓
//! Domain Model (nodes, edges, attributes)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use scaffold_graph::{helpers, NodeType, ScaffoldGraph, ROOT_NODE_ID};
//!
//! let mut graph = ScaffoldGraph::new();
//! let ward = helpers::add_child(&mut graph, ROOT_NODE_ID, NodeType::Ward, "ICU").unwrap();
//!
//! // A second parent is refused
//! let team = helpers::add_child(&mut graph, ROOT_NODE_ID, NodeType::Team, "Nursing").unwrap();
//! assert!(graph.connect(&team, &ward).is_err());
//!
//! let json = graph.export_json().unwrap().unwrap();
//! assert!(json.contains("\"ICU\""));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod codec;
pub mod error;
pub mod export;
pub mod graph;
pub mod helpers;
pub mod persistence;
pub mod sanitize;
pub mod storage;
pub mod tree;
pub mod validate;
pub mod visibility;

// Re-export main types
pub use codec::{graph_to_tree, tree_to_graph, LayoutOptions};
pub use error::{ConnectionRejected, ImportError, Result, ScaffoldError};
pub use graph::{
    color_for_type, label_for_type, palette_types, AttachedData, ChipColor, ConnectionType, Edge,
    EdgeData, EdgeId, GraphState, Node, NodeData, NodeId, NodeType, OrganizationIds, Position,
    ScaffoldGraph, UserMetadata, UserRole, ROOT_NODE_ID,
};
pub use persistence::{PersistenceOptions, SaveDebouncer, StatePersister};
pub use sanitize::{ensure_root, sanitize_loaded_state, Checked};
pub use storage::{MemoryBackend, StorageBackend};
#[cfg(feature = "rocksdb-backend")]
pub use storage::RocksDBBackend;
pub use tree::{TreeDocument, TreeNode};
pub use validate::can_connect;
pub use visibility::{is_visible, CollapseSet, Visibility};
