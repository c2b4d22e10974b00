//! A user builds a hierarchy step by step.

use scaffold_graph::helpers::{self, UserDetails};
use scaffold_graph::{
    palette_types, CollapseSet, ConnectionRejected, NodeType, Position, ScaffoldError,
    ScaffoldGraph, UserRole, ROOT_NODE_ID,
};

fn rejection(err: ScaffoldError) -> ConnectionRejected {
    match err {
        ScaffoldError::Connection(reason) => reason,
        other => panic!("expected a connection rejection, got {other}"),
    }
}

#[test]
fn test_build_hospital_hierarchy() {
    let mut graph = ScaffoldGraph::new();
    assert!(!palette_types(graph.has_root_organization()).contains(&NodeType::Organization));

    let hospital = helpers::add_child(&mut graph, ROOT_NODE_ID, NodeType::Hospital, "General").unwrap();
    let ward = helpers::add_child(&mut graph, &hospital, NodeType::Ward, "ICU").unwrap();
    let room = helpers::add_child(&mut graph, &ward, NodeType::Room, "101").unwrap();
    helpers::add_child(&mut graph, &room, NodeType::Bed, "A").unwrap();
    let team = helpers::add_child(&mut graph, &hospital, NodeType::Team, "Nursing").unwrap();
    let nurse = helpers::add_user(
        &mut graph,
        &team,
        UserDetails {
            name: "Florence",
            email: Some("florence@example.org"),
            role: Some(UserRole::Viewer),
            ..UserDetails::default()
        },
    )
    .unwrap();

    assert_eq!(graph.node_count(), 7);
    assert_eq!(graph.edge_count(), 6);
    graph.validate_structure().unwrap();

    // Second parent for the room
    let other_ward = graph.add_node(NodeType::Ward, "ER", Position::new(600.0, 280.0)).unwrap();
    let err = graph.connect(&other_ward, &room).unwrap_err();
    assert_eq!(rejection(err), ConnectionRejected::MultipleParents);

    // Hospital under its own ward
    graph.delete_edge(&helpers::edge_between(&graph, ROOT_NODE_ID, &hospital).unwrap()).unwrap();
    let err = graph.connect(&ward, &hospital).unwrap_err();
    assert_eq!(rejection(err), ConnectionRejected::Cycle);

    // Users are leaves
    let err = graph.connect(&nurse, &other_ward).unwrap_err();
    assert_eq!(rejection(err), ConnectionRejected::UserSource);

    graph.connect(ROOT_NODE_ID, &hospital).unwrap();
    graph.connect(&hospital, &other_ward).unwrap();
    graph.validate_structure().unwrap();
}

#[test]
fn test_collapse_follows_edits() {
    let mut graph = ScaffoldGraph::new();
    let hospital = helpers::add_child(&mut graph, ROOT_NODE_ID, NodeType::Hospital, "General").unwrap();
    let ward = helpers::add_child(&mut graph, &hospital, NodeType::Ward, "ICU").unwrap();
    helpers::add_child(&mut graph, &ward, NodeType::Room, "101").unwrap();

    let collapsed = CollapseSet::new().toggle(&hospital);
    assert_eq!(graph.visibility(&collapsed).node_count(), 2);

    graph.delete_node(&hospital).unwrap();
    let collapsed = collapsed.retain_existing(graph.nodes());
    assert!(collapsed.is_empty());
    // The ward is now a top-level orphan with its room below it
    assert_eq!(graph.visibility(&collapsed).node_count(), 3);
    assert_eq!(graph.to_tree().unwrap().len(), 2);
}

#[test]
fn test_moving_nodes() {
    let mut graph = ScaffoldGraph::new();
    let team = graph.add_node(NodeType::Team, "T", Position::default()).unwrap();
    graph.set_position(&team, Position::new(12.0, 34.0)).unwrap();
    assert_eq!(graph.get_node(&team).unwrap().position, Position::new(12.0, 34.0));

    assert!(matches!(
        graph.set_position(ROOT_NODE_ID, Position::new(1.0, 1.0)),
        Err(ScaffoldError::InvalidOperation { .. })
    ));
    assert!(matches!(
        graph.set_position("node-unknown", Position::default()),
        Err(ScaffoldError::NodeNotFound { .. })
    ));
}
