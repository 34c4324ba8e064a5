//! Text analysis for indexing and querying.
//!
//! Analysis follows a single fixed pipeline:
//!
//! ```text
//! Text -> Matcher replacement -> Case folding -> Diacritic stripping
//!      -> Boundary split -> Length/stop-word filter -> Tokens
//! ```
//!
//! The same [`Tokenizer`] instance is used at index time and at query time,
//! which guarantees that query tokens line up with indexed tokens.

pub mod tokenizer;

pub use tokenizer::{Tokenizer, TokenizerConfig};
