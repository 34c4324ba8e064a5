//! Tag partitioning.

use ahash::{AHashMap, AHashSet};

use crate::data::DocKey;

/// Maps a tag value (e.g. a locale) to the set of document keys carrying it.
///
/// A pure membership structure, independent of field content; it lets a
/// query restrict its candidates to one tag without scanning the corpus.
#[derive(Debug, Default)]
pub struct TagPartition {
    tags: AHashMap<String, AHashSet<DocKey>>,
}

impl TagPartition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key under a tag value.
    pub fn insert(&mut self, tag: &str, key: DocKey) {
        self.tags.entry(tag.to_string()).or_default().insert(key);
    }

    /// Drop a key from a tag value. Emptied tag sets are removed.
    pub fn remove(&mut self, tag: &str, key: &DocKey) {
        if let Some(set) = self.tags.get_mut(tag) {
            set.remove(key);
            if set.is_empty() {
                self.tags.remove(tag);
            }
        }
    }

    /// The keys carrying a tag value, if any.
    pub fn keys(&self, tag: &str) -> Option<&AHashSet<DocKey>> {
        self.tags.get(tag)
    }

    /// Number of distinct tag values.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over (tag, key set) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AHashSet<DocKey>)> {
        self.tags.iter()
    }
}
