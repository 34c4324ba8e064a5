//! The document index: an in-memory, mutable, multi-field inverted index.
//!
//! [`DocumentIndex`] owns every index structure (tokenizer, per-field
//! inverted indexes, tag partition, document store) and exposes the
//! add/update/remove/search contract. Mutation takes `&mut self`, so the
//! single-writer rule is enforced by the borrow checker; any number of
//! concurrent `&self` readers is safe. For a shared-handle deployment see
//! [`IndexWorker`](crate::worker::IndexWorker).

pub mod config;
pub mod field;
pub mod posting;
pub mod store;
pub mod tag;

use ahash::{AHashMap, AHashSet};
use log::debug;
use std::collections::HashMap;

use crate::data::{DataValue, DocKey, Document};
use crate::analysis::Tokenizer;
use crate::error::Result;
use crate::index::config::IndexConfig;
use crate::index::field::FieldIndex;
use crate::index::store::{DocEntry, DocumentStore};
use crate::index::tag::TagPartition;
use crate::search::{Hit, SearchRequest, SearchResults};

/// Index statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of documents currently indexed.
    pub doc_count: usize,
    /// Number of distinct (field, term) entries across all fields.
    pub term_count: usize,
    /// Number of distinct tag values.
    pub tag_count: usize,
}

/// An in-memory full-text search index over keyed documents.
///
/// Documents are created with [`add`](Self::add), replaced with
/// [`update`](Self::update) (an atomic remove+add under the same key;
/// re-adding an existing key behaves the same way) and destroyed with
/// [`remove`](Self::remove), which purges postings, tag membership and the
/// stored payload. Queries go through [`search`](Self::search).
///
/// # Example
///
/// ```
/// use findex::{Document, DocumentIndex, IndexConfig, SearchRequest, TokenizeMode};
///
/// let config = IndexConfig::builder()
///     .add_indexed_field("title", TokenizeMode::Forward)
///     .add_indexed_field("description", TokenizeMode::Strict)
///     .add_stored_field("href")
///     .build()
///     .unwrap();
/// let mut index = DocumentIndex::new(config).unwrap();
///
/// index.add(
///     Document::new(1u64)
///         .tag("en")
///         .add_text("title", "Alert")
///         .add_text("description", "Use the alert shortcode")
///         .add_text("href", "/docs/alert/"),
/// );
///
/// let results = index.search(&SearchRequest::new("alert"));
/// assert_eq!(results.total_hits, 1);
/// ```
pub struct DocumentIndex {
    pub(crate) config: IndexConfig,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) fields: AHashMap<String, FieldIndex>,
    pub(crate) tags: TagPartition,
    pub(crate) store: DocumentStore,
    pub(crate) seq: u64,
}

impl std::fmt::Debug for DocumentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentIndex")
            .field("doc_count", &self.store.len())
            .field("fields", &self.fields.len())
            .field("tags", &self.tags.len())
            .finish()
    }
}

impl DocumentIndex {
    /// Create an empty index from a validated configuration.
    pub fn new(config: IndexConfig) -> Result<Self> {
        let tokenizer = Tokenizer::new(&config.tokenizer)?;
        let fields = config
            .indexed_fields()
            .map(|name| (name.to_string(), FieldIndex::new()))
            .collect();

        Ok(Self {
            config,
            tokenizer,
            fields,
            tags: TagPartition::new(),
            store: DocumentStore::new(),
            seq: 0,
        })
    }

    /// Add a document, replacing any existing document under the same key.
    ///
    /// Fields absent from the configuration are ignored; a document that
    /// carries no configured field at all is skipped entirely, leaving the
    /// index (including any document already under that key) untouched.
    pub fn add(&mut self, doc: Document) {
        if !self
            .config
            .fields
            .iter()
            .any(|(name, _)| doc.fields.contains_key(name))
        {
            debug!("document {} carries no configured field, skipped", doc.key);
            return;
        }

        if self.store.contains(&doc.key) {
            self.remove(&doc.key.clone());
        }

        let seq = self.seq;
        self.seq += 1;

        let mut payload = HashMap::new();
        let mut terms_by_field = HashMap::new();

        for (name, field_config) in &self.config.fields {
            let Some(value) = doc.fields.get(name) else {
                continue;
            };

            if field_config.stored {
                payload.insert(name.clone(), value.clone());
            }

            if field_config.indexed
                && let Some(text) = index_text(value)
            {
                let tokens = self.tokenizer.encode(&text);
                let mut expanded = AHashSet::new();
                for token in &tokens {
                    expanded.extend(
                        field_config
                            .tokenize
                            .expand(token, self.tokenizer.min_length()),
                    );
                }
                if expanded.is_empty() {
                    continue;
                }

                let mut terms: Vec<String> = expanded.into_iter().collect();
                terms.sort_unstable();

                let field_index = self
                    .fields
                    .get_mut(name)
                    .expect("indexed field registered at construction");
                for term in &terms {
                    field_index.insert(term, &doc.key);
                }
                terms_by_field.insert(name.clone(), terms);
            }
        }

        if let Some(tag) = &doc.tag {
            self.tags.insert(tag, doc.key.clone());
        }

        debug!(
            "indexed document {} ({} indexed fields, seq {seq})",
            doc.key,
            terms_by_field.len()
        );

        self.store.insert(
            doc.key,
            DocEntry {
                seq,
                tag: doc.tag,
                payload,
                terms: terms_by_field,
            },
        );
    }

    /// Update a document: an atomic remove+add under the same key. A key
    /// not currently present is simply added.
    pub fn update(&mut self, doc: Document) {
        self.add(doc);
    }

    /// Remove a document, purging its postings, tag membership and stored
    /// payload. Removing an absent key is a no-op returning `false`.
    pub fn remove(&mut self, key: &DocKey) -> bool {
        let Some(entry) = self.store.remove(key) else {
            return false;
        };

        for (field, terms) in &entry.terms {
            if let Some(field_index) = self.fields.get_mut(field) {
                for term in terms {
                    field_index.remove(term, key);
                }
            }
        }

        if let Some(tag) = &entry.tag {
            self.tags.remove(tag, key);
        }

        debug!("removed document {key}");
        true
    }

    /// Execute a search.
    ///
    /// The query is tokenized with the index's own tokenizer, so query-time
    /// and index-time normalization always agree. Candidates are gathered
    /// from every searched field independently (a match in any field
    /// qualifies, deduplicated by key), ranked by number of distinct query
    /// tokens matched and, among equals, by most recent insertion, then cut
    /// to the `[offset, offset + limit)` window.
    pub fn search(&self, request: &SearchRequest) -> SearchResults {
        let mut tokens = distinct(self.tokenizer.encode(&request.query));
        if tokens.is_empty() {
            return SearchResults::empty();
        }

        let tag_keys = match &request.tag {
            Some(tag) => match self.tags.keys(tag) {
                Some(keys) => Some(keys),
                // Unknown tag: nothing can match.
                None => return SearchResults::empty(),
            },
            None => None,
        };

        let searched: Vec<&FieldIndex> = match &request.fields {
            Some(names) => names
                .iter()
                .filter_map(|name| self.fields.get(name.as_str()))
                .collect(),
            None => self
                .config
                .indexed_fields()
                .filter_map(|name| self.fields.get(name))
                .collect(),
        };
        if searched.is_empty() {
            return SearchResults::empty();
        }

        // Process rare tokens first. Purely a work-shortcut heuristic; the
        // ranking below does not depend on token order.
        tokens.sort_by_key(|token| {
            searched
                .iter()
                .filter_map(|field| field.postings(token))
                .map(|list| list.len())
                .sum::<usize>()
        });

        // Count, per candidate key, how many distinct query tokens it
        // matched in at least one searched field.
        let mut counts: AHashMap<&DocKey, usize> = AHashMap::new();
        let mut token_seen: AHashSet<&DocKey> = AHashSet::new();
        for token in &tokens {
            token_seen.clear();
            for field in &searched {
                let Some(postings) = field.postings(token) else {
                    continue;
                };
                for key in postings.keys() {
                    if let Some(allowed) = tag_keys
                        && !allowed.contains(key)
                    {
                        continue;
                    }
                    if token_seen.insert(key) {
                        *counts.entry(key).or_insert(0) += 1;
                    }
                }
            }
        }

        // Rank: matched token count descending, then recency descending.
        // Keys with no store entry are a consistency error and are dropped.
        let mut ranked: Vec<(&DocKey, usize, u64)> = counts
            .into_iter()
            .filter_map(|(key, count)| self.store.get(key).map(|entry| (key, count, entry.seq)))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));

        let total_hits = ranked.len();
        let limit = request.limit.unwrap_or(self.config.default_limit);

        let hits = ranked
            .into_iter()
            .skip(request.offset)
            .take(limit)
            .map(|(key, matched_tokens, _)| Hit {
                key: key.clone(),
                matched_tokens,
                payload: if request.enrich {
                    self.store.get(key).map(|entry| entry.payload.clone())
                } else {
                    None
                },
            })
            .collect();

        SearchResults { hits, total_hits }
    }

    /// Whether a document with this key is indexed.
    pub fn contains(&self, key: &DocKey) -> bool {
        self.store.contains(key)
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The configuration this index was built from.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            doc_count: self.store.len(),
            term_count: self.fields.values().map(|f| f.term_count()).sum(),
            tag_count: self.tags.len(),
        }
    }
}

/// Render a field value as indexable text. Numbers and booleans index as
/// their display form, like any other single token.
fn index_text(value: &DataValue) -> Option<String> {
    match value {
        DataValue::Text(s) => Some(s.clone()),
        DataValue::Int64(i) => Some(i.to_string()),
        DataValue::Float64(f) => Some(f.to_string()),
        DataValue::Bool(b) => Some(b.to_string()),
        DataValue::Null => None,
    }
}

/// Keep the first occurrence of each token, preserving order.
fn distinct(tokens: Vec<String>) -> Vec<String> {
    let mut seen = AHashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TokenizerConfig;
    use crate::index::field::TokenizeMode;

    fn small_index() -> DocumentIndex {
        let config = IndexConfig::builder()
            .add_indexed_field("title", TokenizeMode::Strict)
            .add_indexed_field("description", TokenizeMode::Strict)
            .add_stored_field("href")
            .tokenizer(TokenizerConfig::default().min_length(2))
            .build()
            .unwrap();
        DocumentIndex::new(config).unwrap()
    }

    #[test]
    fn test_add_and_search() {
        let mut index = small_index();
        index.add(
            Document::new(1u64)
                .tag("en")
                .add_text("title", "Alert")
                .add_text("description", "Use the alert shortcode")
                .add_text("href", "/docs/alert/"),
        );

        let results = index.search(&SearchRequest::new("alert"));
        assert_eq!(results.keys(), vec![DocKey::Int(1)]);

        // Store-only fields are never searched.
        let results = index.search(&SearchRequest::new("docs"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_empty_query() {
        let mut index = small_index();
        index.add(Document::new(1u64).add_text("title", "Alert"));

        assert!(index.search(&SearchRequest::new("")).is_empty());
        assert!(index.search(&SearchRequest::new("---")).is_empty());
        // Token below min_length is filtered out.
        assert!(index.search(&SearchRequest::new("e")).is_empty());
    }

    #[test]
    fn test_document_without_configured_fields_is_skipped() {
        let mut index = small_index();
        index.add(Document::new(1u64).tag("en").add_text("body", "unconfigured"));

        assert!(index.is_empty());
        assert!(!index.contains(&DocKey::Int(1)));
        assert_eq!(index.stats().tag_count, 0);

        // An existing document under the same key survives the skip.
        index.add(Document::new(2u64).add_text("title", "Alert"));
        index.add(Document::new(2u64).add_text("body", "unconfigured"));
        assert_eq!(
            index.search(&SearchRequest::new("alert")).keys(),
            vec![DocKey::Int(2)]
        );
    }

    #[test]
    fn test_readd_is_update() {
        let mut index = small_index();
        index.add(Document::new(1u64).add_text("title", "Alert"));
        index.add(Document::new(1u64).add_text("title", "Badge"));

        assert_eq!(index.len(), 1);
        assert!(index.search(&SearchRequest::new("alert")).is_empty());
        assert_eq!(
            index.search(&SearchRequest::new("badge")).keys(),
            vec![DocKey::Int(1)]
        );
    }

    #[test]
    fn test_remove_purges_everything() {
        let mut index = small_index();
        index.add(
            Document::new(1u64)
                .tag("en")
                .add_text("title", "Alert")
                .add_text("href", "/docs/alert/"),
        );

        assert!(index.remove(&DocKey::Int(1)));
        assert!(!index.remove(&DocKey::Int(1)));
        assert!(index.is_empty());
        assert!(index.search(&SearchRequest::new("alert")).is_empty());
        let stats = index.stats();
        assert_eq!(stats.term_count, 0);
        assert_eq!(stats.tag_count, 0);
    }

    #[test]
    fn test_ranking_and_recency_tie_break() {
        let mut index = small_index();
        index.add(Document::new(1u64).add_text("title", "alert badge"));
        index.add(Document::new(2u64).add_text("title", "alert"));
        index.add(Document::new(3u64).add_text("title", "alert badge card"));

        // Doc 1 and 3 match both tokens; 3 is newer, so it ranks first.
        let results = index.search(&SearchRequest::new("alert badge"));
        assert_eq!(
            results.keys(),
            vec![DocKey::Int(3), DocKey::Int(1), DocKey::Int(2)]
        );
        assert_eq!(results.hits[0].matched_tokens, 2);
        assert_eq!(results.hits[2].matched_tokens, 1);
    }

    #[test]
    fn test_tag_filter() {
        let mut index = small_index();
        index.add(Document::new(1u64).tag("en").add_text("title", "Alert"));
        index.add(Document::new(2u64).tag("fr").add_text("title", "Alerte alert"));

        let results = index.search(&SearchRequest::new("alert").tag("fr"));
        assert_eq!(results.keys(), vec![DocKey::Int(2)]);

        // Unknown tag matches nothing.
        assert!(index.search(&SearchRequest::new("alert").tag("de")).is_empty());
    }

    #[test]
    fn test_field_selection() {
        let mut index = small_index();
        index.add(
            Document::new(1u64)
                .add_text("title", "Badge")
                .add_text("description", "enrich headings"),
        );

        let hit = index.search(&SearchRequest::new("headings").field("description"));
        assert_eq!(hit.total_hits, 1);

        let miss = index.search(&SearchRequest::new("headings").field("title"));
        assert!(miss.is_empty());

        // Unknown field names contribute no candidates.
        let none = index.search(&SearchRequest::new("headings").field("body"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_enrichment_payload() {
        let mut index = small_index();
        index.add(
            Document::new(1u64)
                .add_text("title", "Alert")
                .add_text("href", "/docs/alert/"),
        );

        let results = index.search(&SearchRequest::new("alert"));
        let payload = results.hits[0].payload.as_ref().unwrap();
        assert_eq!(
            payload.get("href").and_then(|v| v.as_text()),
            Some("/docs/alert/")
        );

        let bare = index.search(&SearchRequest::new("alert").enrich(false));
        assert!(bare.hits[0].payload.is_none());
    }

    #[test]
    fn test_forward_mode_prefix_search() {
        let config = IndexConfig::builder()
            .add_indexed_field("title", TokenizeMode::Forward)
            .tokenizer(TokenizerConfig::default().min_length(2))
            .build()
            .unwrap();
        let mut index = DocumentIndex::new(config).unwrap();
        index.add(Document::new(1u64).add_text("title", "shortcode"));

        for prefix in ["sh", "shor", "shortcod", "shortcode"] {
            assert_eq!(
                index.search(&SearchRequest::new(prefix)).total_hits,
                1,
                "prefix {prefix} should match"
            );
        }
        assert!(index.search(&SearchRequest::new("hortcode")).is_empty());
    }

    #[test]
    fn test_numeric_field_indexes_as_text() {
        let mut index = small_index();
        index.add(Document::new(1u64).add_field("title", 2024i64));
        assert_eq!(index.search(&SearchRequest::new("2024")).total_hits, 1);
    }

    #[test]
    fn test_duplicate_query_tokens_count_once() {
        let mut index = small_index();
        index.add(Document::new(1u64).add_text("title", "alert"));

        let results = index.search(&SearchRequest::new("alert alert alert"));
        assert_eq!(results.hits[0].matched_tokens, 1);
    }
}
