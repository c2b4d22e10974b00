//! Storage backend abstractions and implementations.
//!
//! This module defines the [`StorageBackend`] trait and provides implementations:
//! - [`MemoryBackend`]: In-memory storage, the default
//! - `RocksDBBackend`: Persistent storage, behind the `rocksdb-backend` feature
//!
//! The editor keeps its whole state under one key (see
//! [`crate::persistence`]), so the interface is a plain key-value store.

mod memory;
#[cfg(feature = "rocksdb-backend")]
mod rocksdb_backend;

pub use memory::MemoryBackend;
#[cfg(feature = "rocksdb-backend")]
pub use rocksdb_backend::RocksDBBackend;

use crate::error::Result;

/// Trait defining the storage backend interface.
///
/// All storage operations are explicit and return `Result` to handle failures.
pub trait StorageBackend: Send + Sync {
    /// Store a key-value pair, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Storage`](crate::ScaffoldError::Storage) if the write fails.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Storage`](crate::ScaffoldError::Storage) if the read fails.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Delete a key-value pair. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Storage`](crate::ScaffoldError::Storage) if the delete fails.
    fn delete(&mut self, key: &[u8]) -> Result<()>;

    /// Check if a key exists.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Storage`](crate::ScaffoldError::Storage) if the check fails.
    fn exists(&self, key: &[u8]) -> Result<bool>;

    /// Flush any buffered writes.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Storage`](crate::ScaffoldError::Storage) if flush fails.
    fn flush(&mut self) -> Result<()>;
}
