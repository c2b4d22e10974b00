//! End-to-end scenarios: editing sessions, import/export and persistence.

mod editing_session_test;
mod import_export_test;
#[cfg(feature = "rocksdb-backend")]
mod rocksdb_persistence_test;
