//! Unit tests for collapse sets and the visible view.

use scaffold_graph::graph::algorithms::ParentIndex;
use scaffold_graph::visibility::initial_collapsed_for_import;
use scaffold_graph::{
    is_visible, tree_to_graph, CollapseSet, Edge, GraphState, Node, NodeData, NodeType, Position,
    TreeNode, Visibility, ROOT_NODE_ID,
};

fn campus() -> GraphState {
    let ward = TreeNode::new(NodeType::Ward, "ICU")
        .with_child(TreeNode::new(NodeType::Room, "R1").with_child(TreeNode::new(NodeType::Bed, "B1")))
        .with_child(TreeNode::new(NodeType::Room, "R2"));
    tree_to_graph(&[TreeNode::new(NodeType::Organization, "Acme")
        .with_child(TreeNode::new(NodeType::Hospital, "General").with_child(ward))
        .with_child(TreeNode::new(NodeType::Team, "Nursing"))])
}

#[test]
fn test_everything_visible_when_expanded() {
    let state = campus();
    let view = Visibility::compute(&state.nodes, &state.edges, &CollapseSet::new());
    assert_eq!(view.node_count(), state.nodes.len());
    assert_eq!(view.edges().count(), state.edges.len());
}

#[test]
fn test_collapse_hides_whole_subtree_only() {
    let state = campus();
    // node-0-0 is General, node-0-0-0 is ICU
    let collapsed = CollapseSet::new().collapse("node-0-0-0");
    let parents = ParentIndex::build(&state.edges);

    assert!(is_visible("node-0-0-0", &collapsed, &parents));
    assert!(!is_visible("node-0-0-0-0", &collapsed, &parents));
    assert!(!is_visible("node-0-0-0-0-0", &collapsed, &parents));
    assert!(is_visible("node-0-1", &collapsed, &parents));

    let view = Visibility::compute(&state.nodes, &state.edges, &collapsed);
    assert_eq!(view.node_count(), state.nodes.len() - 3);
    assert!(view.edges().all(|e| view.is_visible(&e.source) && view.is_visible(&e.target)));
}

#[test]
fn test_collapse_is_monotone_and_expand_restores() {
    let state = campus();
    let base = CollapseSet::new().collapse("node-0-0-0-0");
    let before = Visibility::compute(&state.nodes, &state.edges, &base);

    for node in &state.nodes {
        let more = base.collapse(&node.id);
        let after = Visibility::compute(&state.nodes, &state.edges, &more);
        assert!(after.nodes().all(|n| before.is_visible(&n.id)));

        let restored = more.toggle(&node.id);
        if !base.contains(&node.id) {
            let again = Visibility::compute(&state.nodes, &state.edges, &restored);
            assert_eq!(again.node_count(), before.node_count());
        }
    }
}

#[test]
fn test_root_is_always_visible() {
    let state = campus();
    let collapsed: CollapseSet = state.nodes.iter().map(|n| n.id.clone()).collect();
    let view = Visibility::compute(&state.nodes, &state.edges, &collapsed);
    assert!(view.is_visible(ROOT_NODE_ID));
    assert_eq!(view.node_count(), 1);
    assert_eq!(view.edges().count(), 0);
}

#[test]
fn test_initial_collapse_after_import() {
    let state = campus();
    let collapsed = initial_collapsed_for_import(&state.nodes, &state.edges);
    assert!(!collapsed.contains(ROOT_NODE_ID));
    assert!(!collapsed.contains("node-0-0"));
    assert!(!collapsed.contains("node-0-1"));
    assert!(collapsed.contains("node-0-0-0"));

    let view = Visibility::compute(&state.nodes, &state.edges, &collapsed);
    let names: Vec<&str> = view.nodes().map(|n| n.name()).collect();
    assert_eq!(names, vec!["Acme", "General", "ICU", "Nursing"]);
}

#[test]
fn test_retain_existing_forgets_deleted_nodes() {
    let state = campus();
    let collapsed = CollapseSet::new().collapse("node-0-0").collapse("gone");
    let pruned = collapsed.retain_existing(&state.nodes);
    assert_eq!(pruned.iter().collect::<Vec<_>>(), vec!["node-0-0"]);
}

#[test]
fn test_deep_chain_collapse_near_top() {
    const DEPTH: usize = 10_000;

    let mut nodes = vec![Node::root()];
    let mut edges = Vec::new();
    let mut parent = ROOT_NODE_ID.to_string();
    for i in 0..DEPTH {
        let id = format!("r{i}");
        nodes.push(Node::new(id.as_str(), NodeData::new(NodeType::Role, id.as_str()), Position::default()));
        edges.push(Edge::new(parent.as_str(), id.as_str()));
        parent = id;
    }

    let expanded = Visibility::compute(&nodes, &edges, &CollapseSet::new());
    assert_eq!(expanded.node_count(), DEPTH + 1);

    let collapsed = CollapseSet::new().collapse("r0");
    let view = Visibility::compute(&nodes, &edges, &collapsed);
    assert_eq!(view.node_count(), 2);
    assert_eq!(view.edges().count(), 1);

    let parents = ParentIndex::build(&edges);
    assert!(!is_visible(&parent, &collapsed, &parents));
}
