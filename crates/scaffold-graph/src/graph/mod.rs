//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`Node`]: A unit of the organizational hierarchy
//! - [`Edge`]: A directed parent -> child relationship
//! - [`ScaffoldGraph`]: The editable graph that keeps the tree invariants

mod attributes;
mod palette;
mod scaffold;
mod types;
pub mod algorithms;

pub use attributes::{AttachedData, AttachedDataEntry, OrganizationIds};
pub use palette::{color_for_type, label_for_type, palette_types, ChipColor};
pub use scaffold::ScaffoldGraph;
pub use types::{
    ConnectionType, Edge, EdgeData, EdgeId, GraphState, Node, NodeData, NodeId, NodeType, Position,
    UserLocation, UserMetadata, UserRole, DEFAULT_ROOT_NAME, NODE_RENDER_TYPE, ROOT_NODE_ID,
};
