//! Best-effort persistence of the editor state under a single key.
//!
//! Persistence must never get in the way of editing: read and write failures
//! are logged and swallowed. Whatever comes back from storage goes through
//! [`sanitize_loaded_state`](crate::sanitize::sanitize_loaded_state) and
//! [`ensure_root`] before it is used.

use crate::graph::{GraphState, ScaffoldGraph};
use crate::sanitize::{ensure_root, parse_stored_state};
use crate::storage::StorageBackend;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Where and how often the editor state is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceOptions {
    /// Storage key holding the `{nodes, edges}` document
    pub storage_key: String,
    /// Quiet period after the last edit before a save, in milliseconds
    pub debounce_ms: u64,
}

impl Default for PersistenceOptions {
    fn default() -> Self {
        Self {
            storage_key: "scaffold-editor-state".to_string(),
            debounce_ms: 300,
        }
    }
}

impl PersistenceOptions {
    /// The debounce delay as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Saves and restores the flat graph state through a [`StorageBackend`].
pub struct StatePersister<B: StorageBackend> {
    backend: B,
    options: PersistenceOptions,
}

impl<B: StorageBackend> StatePersister<B> {
    /// Create a persister with default options.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, PersistenceOptions::default())
    }

    /// Create a persister with explicit options.
    pub fn with_options(backend: B, options: PersistenceOptions) -> Self {
        Self { backend, options }
    }

    /// Options in effect.
    pub fn options(&self) -> &PersistenceOptions {
        &self.options
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Write `state` under the storage key.
    ///
    /// Returns whether the write went through; failures are only logged.
    pub fn save(&mut self, state: &GraphState) -> bool {
        let bytes = match serde_json::to_vec(state) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize editor state: {e}");
                return false;
            }
        };

        match self.backend.put(self.options.storage_key.as_bytes(), &bytes) {
            Ok(()) => {
                trace!("Saved {} bytes of editor state", bytes.len());
                true
            }
            Err(e) => {
                warn!("Failed to save editor state: {e}");
                false
            }
        }
    }

    /// Read the stored state.
    ///
    /// Returns `None` when nothing usable is stored: a missing key, a read
    /// error, or a document with no valid nodes and edges left. Otherwise the
    /// state is sanitized and has its root repaired.
    pub fn load(&self) -> Option<GraphState> {
        let bytes = match self.backend.get(self.options.storage_key.as_bytes()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No stored editor state");
                return None;
            }
            Err(e) => {
                warn!("Failed to read editor state: {e}");
                return None;
            }
        };

        let raw = match String::from_utf8(bytes) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Stored editor state is not UTF-8: {e}");
                return None;
            }
        };

        let state = parse_stored_state(&raw);
        if state.is_empty() {
            debug!("Stored editor state holds nothing usable");
            return None;
        }
        Some(ensure_root(state))
    }

    /// Restore a graph, falling back to a fresh one with only the root.
    pub fn load_graph(&self) -> ScaffoldGraph {
        self.load()
            .map(ScaffoldGraph::from_state)
            .unwrap_or_default()
    }

    /// Remove the stored state.
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.delete(self.options.storage_key.as_bytes()) {
            warn!("Failed to clear editor state: {e}");
        }
    }
}

/// Coalesces bursts of edits into one save.
///
/// The host calls [`schedule`](Self::schedule) after every mutation and
/// [`poll`](Self::poll) from its event loop; a save is due once the delay has
/// passed since the last mutation.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SaveDebouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Create a debouncer from persistence options.
    pub fn from_options(options: &PersistenceOptions) -> Self {
        Self::new(options.debounce())
    }

    /// (Re)start the timer; any pending save moves to `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending save, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a save is waiting.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending save becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once per scheduled burst, when the save is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
