//! JSON tree-document export.
//!
//! One root is written as a bare object, several as an array. An empty graph
//! produces no document at all.

use crate::codec::graph_to_tree;
use crate::error::{Result, ScaffoldError};
use crate::graph::{Edge, Node};
use crate::tree::TreeDocument;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Fixed filename offered for exports.
pub const EXPORT_FILE_NAME: &str = "scaffold.json";

/// Fold the graph into an export document.
///
/// # Errors
///
/// Propagates [`graph_to_tree`] errors; nothing partial is returned.
pub fn export_document(nodes: &[Node], edges: &[Edge]) -> Result<Option<TreeDocument>> {
    let roots = graph_to_tree(nodes, edges)?;
    Ok(TreeDocument::from_roots(roots))
}

/// Export the graph as pretty-printed JSON.
///
/// Returns `Ok(None)` when the graph has no nodes.
///
/// # Errors
///
/// Returns an error if the graph is inconsistent or serialization fails.
pub fn export_json(nodes: &[Node], edges: &[Edge]) -> Result<Option<String>> {
    let Some(document) = export_document(nodes, edges)? else {
        debug!("Nothing to export");
        return Ok(None);
    };

    serde_json::to_string_pretty(&document)
        .map(Some)
        .map_err(|e| ScaffoldError::serialization("Failed to serialize export", Some(e)))
}

/// Write the export into `dir` as [`EXPORT_FILE_NAME`].
///
/// Returns the written path, or `None` if there was nothing to export.
///
/// # Errors
///
/// Returns [`ScaffoldError::Storage`] if the file cannot be written.
pub fn write_export(nodes: &[Node], edges: &[Edge], dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let Some(json) = export_json(nodes, edges)? else {
        return Ok(None);
    };

    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    std::fs::write(&path, json)
        .map_err(|e| ScaffoldError::storage(format!("Failed to write {}", path.display()), Some(e)))?;
    info!("Exported hierarchy to {}", path.display());
    Ok(Some(path))
}
