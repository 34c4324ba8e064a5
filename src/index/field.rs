//! Per-field inverted index.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::data::DocKey;
use crate::index::posting::PostingList;

/// How a field's tokens are expanded into indexed terms.
///
/// Expansion happens at index time; queries look tokens up verbatim. The
/// richer the mode, the more derived terms each token contributes and the
/// shorter the query fragments that still match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizeMode {
    /// Index each token as-is.
    #[default]
    Strict,
    /// Index every prefix of each token (autocomplete matching).
    Forward,
    /// Index every suffix of each token.
    Reverse,
    /// Index every substring of each token.
    Full,
}

impl TokenizeMode {
    /// Expand a token into the set of terms to index, honoring the
    /// tokenizer's minimum length. The token itself is always included.
    pub fn expand(&self, token: &str, min_length: usize) -> AHashSet<String> {
        let min_length = min_length.max(1);
        let mut terms = AHashSet::new();
        terms.insert(token.to_string());

        // Char-boundary offsets, including the end of the token.
        let bounds: Vec<usize> = token
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(token.len()))
            .collect();
        let chars = bounds.len() - 1;

        match self {
            TokenizeMode::Strict => {}
            TokenizeMode::Forward => {
                for end in min_length..chars {
                    terms.insert(token[..bounds[end]].to_string());
                }
            }
            TokenizeMode::Reverse => {
                for start in 1..=chars.saturating_sub(min_length) {
                    terms.insert(token[bounds[start]..].to_string());
                }
            }
            TokenizeMode::Full => {
                for start in 0..chars {
                    for end in (start + min_length)..=chars {
                        terms.insert(token[bounds[start]..bounds[end]].to_string());
                    }
                }
            }
        }

        terms
    }
}

/// Inverted index for a single field: term -> ordered posting list.
#[derive(Debug, Default)]
pub struct FieldIndex {
    postings: AHashMap<String, PostingList>,
}

impl FieldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key under a term. Idempotent per posting list.
    pub fn insert(&mut self, term: &str, key: &DocKey) {
        self.postings
            .entry(term.to_string())
            .or_default()
            .insert(key.clone());
    }

    /// Delete a key from a term's posting list. Emptied lists are dropped
    /// so removed documents do not leave term entries behind.
    pub fn remove(&mut self, term: &str, key: &DocKey) {
        if let Some(list) = self.postings.get_mut(term) {
            list.remove(key);
            if list.is_empty() {
                self.postings.remove(term);
            }
        }
    }

    /// Look up the posting list for a term.
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term)
    }

    /// Number of distinct terms in this field.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Iterate over (term, posting list) pairs. Iteration order is not
    /// defined; callers needing determinism must sort.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PostingList)> {
        self.postings.iter()
    }
}
