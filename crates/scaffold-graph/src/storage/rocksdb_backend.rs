//! RocksDB storage backend.
//!
//! Persists the editor state across process restarts. All writes go through
//! the write-ahead log.

use super::StorageBackend;
use crate::error::{Result, ScaffoldError};
use rocksdb::{Options, DB};
use std::path::Path;
use std::sync::Arc;

/// RocksDB-backed persistent storage.
#[derive(Clone)]
pub struct RocksDBBackend {
    db: Arc<DB>,
}

impl RocksDBBackend {
    /// Open or create a RocksDB database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Storage`] if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        Self::open_with_options(path, opts)
    }

    /// Open a RocksDB database with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Storage`] if the database cannot be opened.
    pub fn open_with_options<P: AsRef<Path>>(path: P, opts: Options) -> Result<Self> {
        let db = DB::open(&opts, path.as_ref()).map_err(|e| {
            ScaffoldError::storage(
                format!("Cannot open RocksDB at {}", path.as_ref().display()),
                Some(e),
            )
        })?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl StorageBackend for RocksDBBackend {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db
            .put(key, value)
            .map_err(|e| ScaffoldError::storage("RocksDB write failed", Some(e)))
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db
            .get(key)
            .map_err(|e| ScaffoldError::storage("RocksDB read failed", Some(e)))
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.db
            .delete(key)
            .map_err(|e| ScaffoldError::storage("RocksDB delete failed", Some(e)))
    }

    fn exists(&self, key: &[u8]) -> Result<bool> {
        self.db
            .get_pinned(key)
            .map(|opt| opt.is_some())
            .map_err(|e| ScaffoldError::storage("RocksDB lookup failed", Some(e)))
    }

    fn flush(&mut self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| ScaffoldError::storage("RocksDB flush failed", Some(e)))
    }
}
