//! Unit tests for tree <-> graph conversion.

use scaffold_graph::codec::{tree_to_graph_with, LayoutOptions};
use scaffold_graph::graph::{AttachedData, UserLocation};
use scaffold_graph::{
    graph_to_tree, tree_to_graph, Edge, Node, NodeData, NodeType, OrganizationIds, Position,
    ScaffoldError, TreeNode, UserMetadata, UserRole, ROOT_NODE_ID,
};

fn rich_tree() -> TreeNode {
    let mut acme = TreeNode::new(NodeType::Organization, "Acme");
    acme.organization_ids = OrganizationIds::from_iter(["ACME-1", "ACME-2"]);

    let mut doctor = TreeNode::new(NodeType::User, "Dr. House");
    doctor.user_metadata = UserMetadata {
        email: Some("house@example.org".to_string()),
        firstname: Some("Gregory".to_string()),
        lastname: Some("House".to_string()),
        role: Some(UserRole::Admin),
        location: UserLocation {
            city: Some("Princeton".to_string()),
            ..UserLocation::default()
        },
    };

    let mut icu = TreeNode::new(NodeType::Ward, "ICU");
    icu.attached_data = AttachedData::new().with("floor", "2").with("beds", "12");

    acme.with_child(
        TreeNode::new(NodeType::Hospital, "Plainsboro")
            .with_child(icu.with_child(TreeNode::new(NodeType::Room, "101")))
            .with_child(TreeNode::new(NodeType::Team, "Diagnostics").with_child(doctor)),
    )
}

#[test]
fn test_round_trip_keeps_every_attribute() {
    let original = vec![rich_tree(), TreeNode::new(NodeType::Role, "Night shift")];
    let state = tree_to_graph(&original);
    assert_eq!(graph_to_tree(&state.nodes, &state.edges).unwrap(), original);
}

#[test]
fn test_round_trip_is_stable_on_second_pass() {
    let once = tree_to_graph(&[rich_tree()]);
    let tree = graph_to_tree(&once.nodes, &once.edges).unwrap();
    let twice = tree_to_graph(&tree);
    assert_eq!(once, twice);
}

#[test]
fn test_edges_follow_parent_child_pairs() {
    let state = tree_to_graph(&[rich_tree()]);
    assert_eq!(state.edges.len(), state.nodes.len() - 1);
    for edge in &state.edges {
        assert_eq!(edge.id, Edge::id_for(&edge.source, &edge.target));
    }
    assert_eq!(state.nodes[0].id, ROOT_NODE_ID);
}

#[test]
fn test_custom_layout_options() {
    let options = LayoutOptions {
        horizontal_gap: 10.0,
        vertical_gap: 50.0,
        leaf_width: 100.0,
        leaf_height: 20.0,
    };
    let tree = TreeNode::new(NodeType::Ward, "W")
        .with_child(TreeNode::new(NodeType::Bed, "1"))
        .with_child(TreeNode::new(NodeType::Bed, "2"));
    let state = tree_to_graph_with(&[tree], &options);

    let positions: Vec<(f64, f64)> = state.nodes.iter().map(|n| (n.position.x, n.position.y)).collect();
    assert_eq!(positions, vec![(0.0, 0.0), (0.0, 50.0), (110.0, 50.0)]);
}

#[test]
fn test_orphans_become_extra_roots() {
    let mut state = tree_to_graph(&[rich_tree()]);
    // Cut the hospital loose from the organization
    state.edges.retain(|e| e.source != ROOT_NODE_ID);

    let roots = graph_to_tree(&state.nodes, &state.edges).unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].name, "Acme");
    assert!(roots[0].children.is_empty());
    assert_eq!(roots[1].name, "Plainsboro");
}

#[test]
fn test_dangling_edge_is_an_error() {
    let mut state = tree_to_graph(&[rich_tree()]);
    state.edges.push(Edge::new(ROOT_NODE_ID, "node-missing"));
    assert!(matches!(
        graph_to_tree(&state.nodes, &state.edges),
        Err(ScaffoldError::DanglingReference { .. })
    ));
}

#[test]
fn test_deep_chain_round_trips_without_recursion() {
    const DEPTH: usize = 2_000;

    let mut nodes = vec![Node::root()];
    let mut edges = Vec::new();
    let mut parent = ROOT_NODE_ID.to_string();
    for i in 0..DEPTH {
        let id = format!("t{i}");
        nodes.push(Node::new(id.as_str(), NodeData::new(NodeType::Team, id.as_str()), Position::default()));
        edges.push(Edge::new(parent.as_str(), id.as_str()));
        parent = id;
    }

    let roots = graph_to_tree(&nodes, &edges).unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].size(), DEPTH + 1);

    let mut deepest = &roots[0];
    while let Some(child) = deepest.children.first() {
        deepest = child;
    }
    assert_eq!(deepest.name, format!("t{}", DEPTH - 1));

    let state = tree_to_graph(&roots);
    assert_eq!(state.nodes.len(), DEPTH + 1);
    assert_eq!(state.edges.len(), DEPTH);
    let last = state.nodes.last().unwrap();
    assert_eq!(last.position.y, DEPTH as f64 * 140.0);
    assert_eq!(last.position.x, 0.0);
}
