//! Export of the hierarchy as a tree document.
//!
//! The exchange format is the nested tree document (see [`crate::tree`]),
//! pretty-printed JSON written under a fixed filename.

pub mod json;

pub use json::{export_document, export_json, write_export, EXPORT_FILE_NAME};
