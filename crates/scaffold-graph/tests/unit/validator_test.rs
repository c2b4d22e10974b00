//! Unit tests for connection validation.

use scaffold_graph::{
    can_connect, ConnectionRejected, Edge, Node, NodeData, NodeType, Position, ROOT_NODE_ID,
};

fn node(id: &str, node_type: NodeType) -> Node {
    Node::new(id, NodeData::new(node_type, id), Position::default())
}

fn hospital() -> (Vec<Node>, Vec<Edge>) {
    let nodes = vec![
        Node::root(),
        node("ward", NodeType::Ward),
        node("other-ward", NodeType::Ward),
        node("room", NodeType::Room),
        node("user", NodeType::User),
    ];
    let edges = vec![Edge::new(ROOT_NODE_ID, "ward"), Edge::new("ward", "room")];
    (nodes, edges)
}

#[test]
fn test_room_with_parent_is_multiple_parents() {
    let (nodes, edges) = hospital();
    let err = can_connect("other-ward", "room", &nodes, &edges).unwrap_err();
    assert_eq!(err, ConnectionRejected::MultipleParents);
    assert_eq!(err.reason_code(), "MULTIPLE_PARENTS");
    assert_eq!(
        err.to_string(),
        "Each node can have only one parent. The graph must stay a tree."
    );
}

#[test]
fn test_child_to_parent_is_cycle() {
    let nodes = vec![node("x", NodeType::Ward), node("y", NodeType::Hospital)];
    let edges = vec![Edge::new("y", "x")];
    let err = can_connect("x", "y", &nodes, &edges);
    assert_eq!(err, Err(ConnectionRejected::Cycle));
}

#[test]
fn test_type_rules() {
    let (nodes, edges) = hospital();
    assert_eq!(
        can_connect("user", "other-ward", &nodes, &edges),
        Err(ConnectionRejected::UserSource)
    );
    assert_eq!(
        can_connect("ward", ROOT_NODE_ID, &nodes, &edges),
        Err(ConnectionRejected::OrganizationTarget)
    );
    assert_eq!(
        can_connect("ward", "ward", &nodes, &edges),
        Err(ConnectionRejected::SelfLoop)
    );
}

#[test]
fn test_only_conflicts_are_announced() {
    assert!(ConnectionRejected::MultipleParents.is_conflict());
    assert!(ConnectionRejected::Cycle.is_conflict());
    assert!(!ConnectionRejected::SelfLoop.is_conflict());
    assert!(!ConnectionRejected::UserSource.is_conflict());
}

#[test]
fn test_gated_insertions_keep_the_tree_shape() {
    let mut nodes = vec![Node::root()];
    for i in 0..12 {
        nodes.push(node(&format!("n{i}"), NodeType::Team));
    }
    let mut edges: Vec<Edge> = Vec::new();

    // Try every ordered pair; accepted edges must never break the invariants
    let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
    for source in &ids {
        for target in &ids {
            if can_connect(source, target, &nodes, &edges).is_ok() {
                edges.push(Edge::new(source.clone(), target.clone()));
            }
        }
    }

    for id in &ids {
        assert!(edges.iter().filter(|e| &e.target == id).count() <= 1);
    }
    assert!(scaffold_graph::graph::algorithms::find_cycle(&nodes, &edges).is_none());
    assert_eq!(edges.len(), nodes.len() - 1);
}

#[test]
fn test_unknown_endpoint() {
    let (nodes, edges) = hospital();
    assert!(matches!(
        can_connect("ward", "ghost", &nodes, &edges),
        Err(ConnectionRejected::UnknownNode { node_id }) if node_id == "ghost"
    ));
}
