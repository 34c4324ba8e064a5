//! Snapshot export/import.
//!
//! A snapshot is the index's raw internal maps, keyed by a small set of
//! named sections: `registry` (per-document bookkeeping and stored
//! payloads), `postings` (per-field term -> ordered keys) and `tags`, plus
//! the insertion sequence counter. Importing a snapshot into a fresh index
//! built from the same configuration reproduces identical search results
//! for any query.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::data::DocKey;
use crate::error::{FindexError, Result};
use crate::index::DocumentIndex;
use crate::index::config::IndexConfig;
use crate::index::store::DocEntry;

/// Posting lists of one field, terms sorted, keys in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPostings {
    pub field: String,
    pub terms: Vec<(String, Vec<DocKey>)>,
}

/// A serialized image of a [`DocumentIndex`]'s internal state.
///
/// Section contents are emitted in a deterministic order (registry by
/// insertion sequence, fields in configuration order, terms and tags
/// sorted) so equal indexes produce byte-identical snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSnapshot {
    /// Next insertion sequence number.
    pub seq: u64,
    /// Document registry: key, bookkeeping terms, tag, stored payload.
    pub registry: Vec<(DocKey, DocEntry)>,
    /// Per-field posting lists.
    pub postings: Vec<FieldPostings>,
    /// Tag partition.
    pub tags: Vec<(String, Vec<DocKey>)>,
}

impl IndexSnapshot {
    /// Serialize the snapshot as JSON to a writer.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)
            .map_err(|e| FindexError::snapshot(format!("failed to encode snapshot: {e}")))
    }

    /// Deserialize a snapshot from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| FindexError::snapshot(format!("failed to decode snapshot: {e}")))
    }
}

impl DocumentIndex {
    /// Export the index's internal state.
    pub fn export(&self) -> IndexSnapshot {
        let mut registry: Vec<(DocKey, DocEntry)> = self
            .store
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();
        registry.sort_by_key(|(_, entry)| entry.seq);

        let mut postings = Vec::new();
        for name in self.config.indexed_fields() {
            let Some(field_index) = self.fields.get(name) else {
                continue;
            };
            let mut terms: Vec<(String, Vec<DocKey>)> = field_index
                .iter()
                .map(|(term, list)| (term.clone(), list.keys().to_vec()))
                .collect();
            terms.sort_by(|a, b| a.0.cmp(&b.0));
            postings.push(FieldPostings {
                field: name.to_string(),
                terms,
            });
        }

        let mut tags: Vec<(String, Vec<DocKey>)> = self
            .tags
            .iter()
            .map(|(tag, keys)| {
                let mut keys: Vec<DocKey> = keys.iter().cloned().collect();
                keys.sort();
                (tag.clone(), keys)
            })
            .collect();
        tags.sort_by(|a, b| a.0.cmp(&b.0));

        IndexSnapshot {
            seq: self.seq,
            registry,
            postings,
            tags,
        }
    }

    /// Rebuild an index from a snapshot and its configuration.
    ///
    /// The configuration must declare every indexed field the snapshot's
    /// postings reference; a mismatch is a snapshot error.
    pub fn import(config: IndexConfig, snapshot: IndexSnapshot) -> Result<Self> {
        let mut index = DocumentIndex::new(config)?;
        index.seq = snapshot.seq;

        for (key, entry) in snapshot.registry {
            index.store.insert(key, entry);
        }

        for field_postings in snapshot.postings {
            let Some(field_index) = index.fields.get_mut(&field_postings.field) else {
                return Err(FindexError::snapshot(format!(
                    "snapshot references unconfigured field: {}",
                    field_postings.field
                )));
            };
            for (term, keys) in field_postings.terms {
                for key in keys {
                    field_index.insert(&term, &key);
                }
            }
        }

        for (tag, keys) in snapshot.tags {
            for key in keys {
                index.tags.insert(&tag, key);
            }
        }

        Ok(index)
    }

    /// Export directly to a writer as JSON.
    pub fn export_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        self.export().to_writer(writer)
    }

    /// Import from a JSON reader.
    pub fn import_from_reader<R: Read>(config: IndexConfig, reader: R) -> Result<Self> {
        let snapshot = IndexSnapshot::from_reader(reader)?;
        Self::import(config, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Document;
    use crate::index::field::TokenizeMode;
    use crate::search::SearchRequest;

    fn config() -> IndexConfig {
        IndexConfig::builder()
            .add_indexed_field("title", TokenizeMode::Forward)
            .add_stored_field("href")
            .build()
            .unwrap()
    }

    fn populated() -> DocumentIndex {
        let mut index = DocumentIndex::new(config()).unwrap();
        index.add(
            Document::new(1u64)
                .tag("en")
                .add_text("title", "Alert")
                .add_text("href", "/docs/alert/"),
        );
        index.add(Document::new(2u64).tag("fr").add_text("title", "Badge"));
        index
    }

    #[test]
    fn test_export_is_deterministic() {
        let index = populated();
        let a = serde_json::to_string(&index.export()).unwrap();
        let b = serde_json::to_string(&index.export()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_round_trip_reproduces_results() {
        let original = populated();
        let snapshot = original.export();
        let restored = DocumentIndex::import(config(), snapshot).unwrap();

        for query in ["alert", "al", "badge", "missing"] {
            let a = original.search(&SearchRequest::new(query));
            let b = restored.search(&SearchRequest::new(query));
            assert_eq!(a.keys(), b.keys(), "query {query}");
            assert_eq!(a.total_hits, b.total_hits);
        }

        // Tag filters survive the round trip.
        let tagged = restored.search(&SearchRequest::new("alert").tag("fr"));
        assert!(tagged.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_sequence() {
        let original = populated();
        let mut restored = DocumentIndex::import(config(), original.export()).unwrap();

        // New additions rank as more recent than everything imported.
        restored.add(Document::new(3u64).add_text("title", "Alert"));
        let results = restored.search(&SearchRequest::new("alert"));
        assert_eq!(results.keys()[0], crate::data::DocKey::Int(3));
    }

    #[test]
    fn test_import_rejects_unknown_field() {
        let mut snapshot = populated().export();
        snapshot.postings.push(FieldPostings {
            field: "body".to_string(),
            terms: vec![],
        });
        let result = DocumentIndex::import(config(), snapshot);
        assert!(matches!(result, Err(FindexError::Snapshot(_))));
    }
}
