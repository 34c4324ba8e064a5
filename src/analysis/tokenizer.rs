//! Tokenizer implementation.

use ahash::AHashSet;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::{FindexError, Result};

/// Default boundary pattern, applied after case folding and diacritic
/// stripping. Configurations indexing non-Latin scripts supply their own
/// pattern (e.g. `[^\p{L}\p{N}]+`).
pub const DEFAULT_BOUNDARY: &str = "[^a-z0-9]+";

/// Configuration for the [`Tokenizer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Minimum token length in characters. Shorter tokens are dropped.
    pub min_length: usize,

    /// Stop words removed from the token stream.
    #[serde(default)]
    pub stop_words: Vec<String>,

    /// Boundary pattern the text is split on.
    pub boundary: String,

    /// Replacement table applied before any other step. Matching is
    /// ASCII-case-insensitive and leftmost-longest.
    #[serde(default)]
    pub matchers: Vec<(String, String)>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_length: 1,
            stop_words: Vec::new(),
            boundary: DEFAULT_BOUNDARY.to_string(),
            matchers: Vec::new(),
        }
    }
}

impl TokenizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum token length.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the stop-word filter.
    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the boundary pattern.
    pub fn boundary(mut self, pattern: impl Into<String>) -> Self {
        self.boundary = pattern.into();
        self
    }

    /// Add a replacement pair to the matcher table.
    pub fn matcher(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.matchers.push((from.into(), to.into()));
        self
    }
}

/// Turns raw text into a normalized token sequence.
///
/// Deterministic and pure: the same input always produces the same output,
/// so a single instance can serve both index-time and query-time encoding.
pub struct Tokenizer {
    min_length: usize,
    stop_words: AHashSet<String>,
    boundary: Regex,
    matcher: Option<MatcherTable>,
}

struct MatcherTable {
    automaton: AhoCorasick,
    replacements: Vec<String>,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("min_length", &self.min_length)
            .field("stop_words", &self.stop_words.len())
            .field("boundary", &self.boundary.as_str())
            .field(
                "matchers",
                &self.matcher.as_ref().map_or(0, |m| m.replacements.len()),
            )
            .finish()
    }
}

impl Tokenizer {
    /// Build a tokenizer from its configuration.
    ///
    /// An invalid boundary pattern or malformed matcher table is a
    /// configuration error and fails here, not at encode time.
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        let boundary = Regex::new(&config.boundary)
            .map_err(|e| FindexError::config(format!("invalid boundary pattern: {e}")))?;

        let matcher = if config.matchers.is_empty() {
            None
        } else {
            let patterns: Vec<&str> = config.matchers.iter().map(|(from, _)| from.as_str()).collect();
            let automaton = AhoCorasickBuilder::new()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::LeftmostLongest)
                .build(&patterns)
                .map_err(|e| FindexError::config(format!("invalid matcher table: {e}")))?;
            let replacements = config.matchers.iter().map(|(_, to)| to.clone()).collect();
            Some(MatcherTable {
                automaton,
                replacements,
            })
        };

        Ok(Self {
            min_length: config.min_length,
            stop_words: config.stop_words.iter().cloned().collect(),
            boundary,
            matcher,
        })
    }

    /// Encode text into an ordered sequence of normalized tokens.
    pub fn encode(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let replaced = match &self.matcher {
            Some(table) => table.automaton.replace_all(text, &table.replacements),
            None => text.to_string(),
        };

        let folded = fold(&replaced);

        self.boundary
            .split(&folded)
            .filter(|token| !token.is_empty())
            .filter(|token| token.chars().count() >= self.min_length)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Minimum token length this tokenizer enforces.
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

/// Lowercase, then strip diacritics via NFD decomposition.
fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
