//! Presentation lookups that are pure functions of the node type.

use super::types::NodeType;
use serde::{Deserialize, Serialize};

/// Chip color class used by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    /// Brand color
    Primary,
    /// Secondary accent
    Secondary,
    /// Green
    Positive,
    /// Amber
    Warning,
    /// Red
    Negative,
    /// Grey
    Neutral,
}

/// Color class for a node type.
///
/// The match has no wildcard arm: adding a [`NodeType`] without a color
/// does not compile.
pub fn color_for_type(node_type: NodeType) -> ChipColor {
    match node_type {
        NodeType::Organization => ChipColor::Primary,
        NodeType::Network => ChipColor::Secondary,
        NodeType::Hospital => ChipColor::Positive,
        NodeType::Practice => ChipColor::Warning,
        NodeType::Clinic => ChipColor::Negative,
        NodeType::Ward => ChipColor::Neutral,
        NodeType::Room => ChipColor::Primary,
        NodeType::Bed => ChipColor::Secondary,
        NodeType::Team => ChipColor::Positive,
        NodeType::User => ChipColor::Warning,
        NodeType::Role => ChipColor::Primary,
    }
}

/// English display label for a node type.
pub fn label_for_type(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Organization => "Organization",
        NodeType::Network => "Network",
        NodeType::Hospital => "Hospital",
        NodeType::Practice => "Practice",
        NodeType::Clinic => "Clinic",
        NodeType::Ward => "Ward",
        NodeType::Room => "Room",
        NodeType::Bed => "Bed",
        NodeType::Team => "Team",
        NodeType::User => "User",
        NodeType::Role => "Role",
    }
}

/// Types offered in the palette. ORGANIZATION is hidden once a root exists.
pub fn palette_types(has_root_organization: bool) -> Vec<NodeType> {
    NodeType::ALL
        .into_iter()
        .filter(|t| *t != NodeType::Organization || !has_root_organization)
        .collect()
}
