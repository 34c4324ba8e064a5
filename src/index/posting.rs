//! Posting lists: the ordered key sets behind each indexed term.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::data::DocKey;

/// An insertion-ordered, duplicate-free sequence of document keys.
///
/// Order is insertion (recency) order; the query engine uses it as the
/// ranking tie-breaker. A key appears at most once; inserting it again is a
/// no-op. The interior set keeps membership checks O(1) without giving up
/// the ordered sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<DocKey>", into = "Vec<DocKey>")]
pub struct PostingList {
    keys: Vec<DocKey>,
    seen: AHashSet<DocKey>,
}

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key if it is not already present. Returns true if inserted.
    pub fn insert(&mut self, key: DocKey) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key.clone());
        self.keys.push(key);
        true
    }

    /// Delete every occurrence of a key. Returns true if the key was present.
    pub fn remove(&mut self, key: &DocKey) -> bool {
        if !self.seen.remove(key) {
            return false;
        }
        self.keys.retain(|k| k != key);
        true
    }

    /// Check membership.
    pub fn contains(&self, key: &DocKey) -> bool {
        self.seen.contains(key)
    }

    /// The keys in insertion order, oldest first.
    pub fn keys(&self) -> &[DocKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<Vec<DocKey>> for PostingList {
    fn from(keys: Vec<DocKey>) -> Self {
        let mut list = PostingList::new();
        for key in keys {
            list.insert(key);
        }
        list
    }
}

impl From<PostingList> for Vec<DocKey> {
    fn from(list: PostingList) -> Self {
        list.keys
    }
}
