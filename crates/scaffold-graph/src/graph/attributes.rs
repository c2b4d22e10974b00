//! Ordered attribute lists carried by nodes and edges.
//!
//! Both types keep insertion order (it is visible in exported documents) and
//! enforce uniqueness on construction, including when deserialized.

use serde::{Deserialize, Serialize};

/// A single free-form key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachedDataEntry {
    /// Entry key, unique within its list
    pub key: String,
    /// Entry value
    pub value: String,
}

impl AttachedDataEntry {
    /// Create an entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered key/value list with unique keys.
///
/// Used for node `attached_data` and edge `attributes`. Serializes as a plain
/// JSON array of `{key, value}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AttachedDataEntry>", into = "Vec<AttachedDataEntry>")]
pub struct AttachedData {
    entries: Vec<AttachedDataEntry>,
}

impl AttachedData {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder pattern: add an entry and return self.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an entry. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(AttachedDataEntry { key, value }),
        }
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Remove an entry by key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index).value)
    }

    /// Check if a key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AttachedDataEntry> {
        self.entries.iter()
    }
}

impl From<Vec<AttachedDataEntry>> for AttachedData {
    /// Later duplicates of a key are dropped.
    fn from(entries: Vec<AttachedDataEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<AttachedData> for Vec<AttachedDataEntry> {
    fn from(data: AttachedData) -> Self {
        data.entries
    }
}

impl FromIterator<AttachedDataEntry> for AttachedData {
    fn from_iter<T: IntoIterator<Item = AttachedDataEntry>>(iter: T) -> Self {
        let mut data = AttachedData::new();
        for entry in iter {
            if !data.contains_key(&entry.key) {
                data.entries.push(entry);
            }
        }
        data
    }
}

/// Ordered list of external organization identifiers, duplicates suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct OrganizationIds {
    ids: Vec<String>,
}

impl OrganizationIds {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Add an identifier.
    ///
    /// Surrounding whitespace is trimmed. Returns `false` when the trimmed
    /// value is empty or already present.
    pub fn push(&mut self, id: impl AsRef<str>) -> bool {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.ids.push(trimmed.to_string());
        true
    }

    /// Remove an identifier.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    /// Check membership.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for OrganizationIds {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<OrganizationIds> for Vec<String> {
    fn from(ids: OrganizationIds) -> Self {
        ids.ids
    }
}

impl<S: Into<String>> FromIterator<S> for OrganizationIds {
    /// Exact duplicates are dropped; values are kept verbatim otherwise.
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut out = OrganizationIds::new();
        for id in iter {
            let id = id.into();
            if !out.contains(&id) {
                out.ids.push(id);
            }
        }
        out
    }
}
