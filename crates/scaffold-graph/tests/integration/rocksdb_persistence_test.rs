//! Editor state persisted in RocksDB across reopen.

use scaffold_graph::{helpers, NodeType, RocksDBBackend, ScaffoldGraph, StatePersister, ROOT_NODE_ID};
use tempfile::TempDir;

#[test]
fn test_state_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("editor.db");

    let mut graph = ScaffoldGraph::new();
    let hospital = helpers::add_child(&mut graph, ROOT_NODE_ID, NodeType::Hospital, "General").unwrap();
    helpers::add_child(&mut graph, &hospital, NodeType::Ward, "ICU").unwrap();

    {
        let mut persister = StatePersister::new(RocksDBBackend::open(&path).unwrap());
        assert!(persister.save(&graph.state()));
    }

    let persister = StatePersister::new(RocksDBBackend::open(&path).unwrap());
    assert_eq!(persister.load_graph(), graph);
}

#[test]
fn test_clear_removes_state() {
    let temp_dir = TempDir::new().unwrap();
    let mut persister = StatePersister::new(RocksDBBackend::open(temp_dir.path()).unwrap());
    persister.save(&ScaffoldGraph::new().state());
    assert!(persister.load().is_some());

    persister.clear();
    assert!(persister.load().is_none());
}
