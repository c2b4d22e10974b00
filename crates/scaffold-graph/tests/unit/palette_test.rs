//! Unit tests for type lookups used by the UI layer.

use scaffold_graph::{color_for_type, label_for_type, palette_types, ChipColor, NodeType};

#[test]
fn test_colors_follow_palette() {
    assert_eq!(color_for_type(NodeType::Organization), ChipColor::Primary);
    assert_eq!(color_for_type(NodeType::Clinic), ChipColor::Negative);
    assert_eq!(color_for_type(NodeType::Ward), ChipColor::Neutral);
    assert_eq!(color_for_type(NodeType::User), ChipColor::Warning);
}

#[test]
fn test_labels_are_distinct() {
    let mut labels: Vec<&str> = NodeType::ALL.iter().map(|t| label_for_type(*t)).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), NodeType::ALL.len());
}

#[test]
fn test_palette_order_and_root_rule() {
    assert_eq!(palette_types(false), NodeType::ALL.to_vec());
    let rooted = palette_types(true);
    assert_eq!(rooted.first(), Some(&NodeType::Network));
    assert!(!rooted.contains(&NodeType::Organization));
}
