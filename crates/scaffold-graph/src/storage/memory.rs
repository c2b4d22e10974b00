//! In-memory storage backend.
//!
//! Data lives as long as the backend (and its clones); nothing touches disk.

use super::StorageBackend;
use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Store = BTreeMap<Vec<u8>, Vec<u8>>;

/// In-memory storage backend using a BTreeMap.
///
/// Clones share the same map, so a host can keep one handle for inspection
/// while another is owned by a [`StatePersister`](crate::StatePersister).
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    data: Arc<RwLock<Store>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of key-value pairs stored.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the backend is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clear all data from the backend.
    pub fn clear(&mut self) {
        self.write().clear();
    }

    // Every write is a single map call; a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryBackend {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.read().get(key).cloned())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.write().remove(key);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool> {
        Ok(self.read().contains_key(key))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
