//! Search requests and results.
//!
//! A [`SearchRequest`] carries the raw query string plus the optional
//! knobs: which fields to search, a tag filter, the pagination window, and
//! whether to attach stored payloads. Execution lives on
//! [`DocumentIndex::search`](crate::index::DocumentIndex::search).

use std::collections::HashMap;

use crate::data::{DataValue, DocKey};

/// A search request against a [`DocumentIndex`](crate::index::DocumentIndex).
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Raw query text, tokenized with the index's tokenizer.
    pub query: String,

    /// Fields to search. `None` means all indexed fields. Names that are
    /// not indexed fields contribute no candidates.
    pub fields: Option<Vec<String>>,

    /// Restrict matches to documents carrying this tag.
    pub tag: Option<String>,

    /// Maximum number of hits. `None` uses the index's default limit.
    pub limit: Option<usize>,

    /// Number of ranked hits to skip (pagination).
    pub offset: usize,

    /// Whether to attach stored payloads to hits.
    pub enrich: bool,
}

impl SearchRequest {
    /// Create a request for the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: None,
            tag: None,
            limit: None,
            offset: 0,
            enrich: true,
        }
    }

    /// Search only the named field.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.get_or_insert_with(Vec::new).push(field.into());
        self
    }

    /// Search only the named fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to one tag value.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Bound the number of hits returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` ranked hits.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Control payload enrichment (on by default).
    pub fn enrich(mut self, enrich: bool) -> Self {
        self.enrich = enrich;
        self
    }
}

/// One matching document.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// The document's key.
    pub key: DocKey,

    /// How many distinct query tokens this document matched; the primary
    /// ranking criterion.
    pub matched_tokens: usize,

    /// Stored payload, present when the request asked for enrichment.
    pub payload: Option<HashMap<String, DataValue>>,
}

/// Ranked, deduplicated, window-bounded search results.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    /// Hits in rank order: more matched tokens first, most recently added
    /// first among equals.
    pub hits: Vec<Hit>,

    /// Number of matching documents before the offset/limit window.
    pub total_hits: usize,
}

impl SearchResults {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Keys of the returned hits, in rank order.
    pub fn keys(&self) -> Vec<DocKey> {
        self.hits.iter().map(|hit| hit.key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
