//! Document store: stored payloads and per-document index bookkeeping.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::{DataValue, DocKey};

/// Everything the index remembers about one document besides its postings.
///
/// `terms` records, per field, the exact expanded terms that were inserted
/// into the field's posting lists, so removal can purge them without
/// re-tokenizing (or knowing) the original text. `payload` holds the stored
/// fields returned on match; it is never consulted during matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocEntry {
    /// Monotonic insertion sequence; the recency tie-breaker for ranking.
    pub seq: u64,

    /// The document's tag, mirrored here so removal can untag it.
    pub tag: Option<String>,

    /// Stored fields, returned on enrichment.
    pub payload: HashMap<String, DataValue>,

    /// Per-field expanded terms actually indexed for this document.
    pub terms: HashMap<String, Vec<String>>,
}

/// Maps document keys to their entries.
#[derive(Debug, Default)]
pub struct DocumentStore {
    entries: AHashMap<DocKey, DocEntry>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for a key.
    pub fn insert(&mut self, key: DocKey, entry: DocEntry) {
        self.entries.insert(key, entry);
    }

    /// Look up the entry for a key.
    pub fn get(&self, key: &DocKey) -> Option<&DocEntry> {
        self.entries.get(key)
    }

    /// Remove and return the entry for a key.
    pub fn remove(&mut self, key: &DocKey) -> Option<DocEntry> {
        self.entries.remove(key)
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &DocKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of documents in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (key, entry) pairs. Iteration order is not defined.
    pub fn iter(&self) -> impl Iterator<Item = (&DocKey, &DocEntry)> {
        self.entries.iter()
    }
}
