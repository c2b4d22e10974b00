//! Import a tree document, edit it, export it again.

use scaffold_graph::export::{write_export, EXPORT_FILE_NAME};
use scaffold_graph::{helpers, ImportError, NodeType, ScaffoldGraph, ROOT_NODE_ID};
use serde_json::{json, Value};
use tempfile::TempDir;

const ACME: &str = r#"[{"name":"Acme","type":"ORGANIZATION","children":[{"name":"ICU","type":"WARD"}]}]"#;

#[test]
fn test_acme_import_exports_single_root_as_object() {
    let mut graph = ScaffoldGraph::new();
    graph.import_json(ACME).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.nodes()[0].id, ROOT_NODE_ID);

    let exported: Value = serde_json::from_str(&graph.export_json().unwrap().unwrap()).unwrap();
    // One root is written as a bare object
    assert_eq!(
        exported,
        json!({"name": "Acme", "type": "ORGANIZATION", "children": [{"name": "ICU", "type": "WARD"}]})
    );
    let original: Value = serde_json::from_str(ACME).unwrap();
    assert_eq!(json!([exported]), original);
}

#[test]
fn test_invalid_import_leaves_graph_untouched() {
    let mut graph = ScaffoldGraph::new();
    graph.import_json(ACME).unwrap();
    let before = graph.clone();

    let err = graph.import_json(r#"{"name":"X"}"#).unwrap_err();
    assert!(matches!(err, ImportError::InvalidFormat));
    assert_eq!(graph, before);

    assert!(graph.import_json("{").is_err());
    assert_eq!(graph, before);
}

#[test]
fn test_import_breaking_hierarchy_rules_is_refused() {
    let mut graph = ScaffoldGraph::new();
    graph.import_json(ACME).unwrap();
    let before = graph.clone();

    let user_with_children = r#"{"name":"Acme","type":"ORGANIZATION","children":[
        {"name":"U","type":"USER","children":[{"name":"W","type":"WARD"}]},
        {"name":"T","type":"TEAM"}
    ]}"#;
    let err = graph.import_json(user_with_children).unwrap_err();
    assert_eq!(err.reason_code(), "INVALID_FORMAT");
    assert_eq!(graph, before);

    let nested_organization = r#"[{"name":"H","type":"HOSPITAL","children":[{"name":"Sub","type":"ORGANIZATION"}]}]"#;
    assert!(graph.import_json(nested_organization).is_err());
    assert_eq!(graph, before);
    graph.validate_structure().unwrap();
}

#[test]
fn test_import_returns_initial_collapse_set() {
    let mut graph = ScaffoldGraph::new();
    let collapsed = graph
        .import_json(
            r#"{"name":"Acme","type":"ORGANIZATION","children":[
                {"name":"General","type":"HOSPITAL","children":[
                    {"name":"ICU","type":"WARD","children":[{"name":"101","type":"ROOM"}]}
                ]}
            ]}"#,
        )
        .unwrap();

    let view = graph.visibility(&collapsed);
    let names: Vec<&str> = view.nodes().map(|n| n.name()).collect();
    assert_eq!(names, vec!["Acme", "General", "ICU"]);

    let expanded = collapsed.expand("node-0-0-0");
    assert_eq!(graph.visibility(&expanded).node_count(), 4);
}

#[test]
fn test_import_without_organization_gets_root() {
    let mut graph = ScaffoldGraph::new();
    graph
        .import_json(r#"[{"name":"Cardiology","type":"WARD"}]"#)
        .unwrap();

    assert!(graph.has_root_organization());
    assert_eq!(graph.node_count(), 2);
    graph.validate_structure().unwrap();
}

#[test]
fn test_edit_then_export_file() {
    let dir = TempDir::new().unwrap();
    let mut graph = ScaffoldGraph::new();
    graph.import_json(ACME).unwrap();

    let icu = graph.nodes()[1].id.clone();
    helpers::add_child(&mut graph, &icu, NodeType::Room, "101").unwrap();
    helpers::attach_data(&mut graph, &icu, "floor", "2").unwrap();

    let path = write_export(graph.nodes(), graph.edges(), dir.path()).unwrap().unwrap();
    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);

    let mut reloaded = ScaffoldGraph::new();
    reloaded.import_file(&path).unwrap();
    assert_eq!(reloaded.to_tree().unwrap(), graph.to_tree().unwrap());
}

#[test]
fn test_unreadable_file() {
    let dir = TempDir::new().unwrap();
    let mut graph = ScaffoldGraph::new();
    let err = graph.import_file(dir.path().join("missing.json")).unwrap_err();
    assert_eq!(err.reason_code(), "UNREADABLE");
}
