//! # Findex
//!
//! A compact in-memory full-text search index for Rust.
//!
//! ## Features
//!
//! - Tokenized multi-field indexing with prefix/suffix/substring expansion
//! - Tag partitioning for scoped queries (e.g. per locale)
//! - Ranked search: all-token matches first, partial matches as fallback
//! - Incremental add/update/remove without rebuilding
//! - Snapshot export/import
//! - Optional worker-thread offload with a message-passing handle

pub mod analysis;
mod data;
mod error;
pub mod index;
mod search;
pub mod snapshot;
pub mod worker;

// Re-exports for the public API
pub use analysis::{Tokenizer, TokenizerConfig};
pub use data::{DataValue, DocKey, Document};
pub use error::{FindexError, Result};
pub use index::config::{FieldConfig, IndexConfig, IndexConfigBuilder};
pub use index::field::TokenizeMode;
pub use index::{DocumentIndex, IndexStats};
pub use search::{Hit, SearchRequest, SearchResults};
pub use snapshot::IndexSnapshot;
pub use worker::{IndexHandle, IndexWorker};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
