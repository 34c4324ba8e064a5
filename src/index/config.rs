//! Index configuration.
//!
//! All configuration is explicit and passed to
//! [`DocumentIndex::new`](crate::index::DocumentIndex::new); there is no
//! shared global state, so differently-configured indexes coexist in one
//! process. Misconfiguration
//! is a programming mistake and fails at [`IndexConfigBuilder::build`], not
//! at query time.

use serde::{Deserialize, Serialize};

use crate::analysis::{Tokenizer, TokenizerConfig};
use crate::error::{FindexError, Result};
use crate::index::field::TokenizeMode;

/// Default number of hits a search returns when the request sets no limit.
pub const DEFAULT_LIMIT: usize = 100;

/// Configuration for a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Whether the field's tokens are searchable.
    pub indexed: bool,

    /// Whether the field's value is kept for result enrichment.
    pub stored: bool,

    /// Term expansion mode for this field's tokens.
    pub tokenize: TokenizeMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            indexed: true,
            stored: true,
            tokenize: TokenizeMode::Strict,
        }
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub fn stored(mut self, stored: bool) -> Self {
        self.stored = stored;
        self
    }

    pub fn tokenize(mut self, mode: TokenizeMode) -> Self {
        self.tokenize = mode;
        self
    }
}

/// Configuration for a [`DocumentIndex`](crate::index::DocumentIndex).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Configured fields, in declaration order.
    pub fields: Vec<(String, FieldConfig)>,

    /// Tokenizer configuration, shared by index time and query time.
    pub tokenizer: TokenizerConfig,

    /// Result limit applied when a request sets none.
    pub default_limit: usize,
}

impl IndexConfig {
    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }

    /// Look up a field's configuration by name.
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, config)| config)
    }

    /// Names of all indexed fields, in declaration order.
    pub fn indexed_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, config)| config.indexed)
            .map(|(name, _)| name.as_str())
    }
}

/// Builder for [`IndexConfig`].
#[derive(Debug, Default)]
pub struct IndexConfigBuilder {
    fields: Vec<(String, FieldConfig)>,
    tokenizer: Option<TokenizerConfig>,
    default_limit: Option<usize>,
}

impl IndexConfigBuilder {
    /// Add a field with an explicit configuration.
    pub fn add_field(mut self, name: impl Into<String>, config: FieldConfig) -> Self {
        self.fields.push((name.into(), config));
        self
    }

    /// Add an indexed (and stored) field with the given expansion mode.
    pub fn add_indexed_field(self, name: impl Into<String>, mode: TokenizeMode) -> Self {
        self.add_field(name, FieldConfig::default().tokenize(mode))
    }

    /// Add a store-only field: returned on match, never searched.
    pub fn add_stored_field(self, name: impl Into<String>) -> Self {
        self.add_field(name, FieldConfig::default().indexed(false))
    }

    /// Set the tokenizer configuration.
    pub fn tokenizer(mut self, config: TokenizerConfig) -> Self {
        self.tokenizer = Some(config);
        self
    }

    /// Set the default result limit.
    pub fn default_limit(mut self, limit: usize) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Validate and build the configuration.
    ///
    /// Fails when no field is indexed, a field name repeats, the default
    /// limit is zero, or the tokenizer configuration does not compile.
    pub fn build(self) -> Result<IndexConfig> {
        if !self.fields.iter().any(|(_, config)| config.indexed) {
            return Err(FindexError::config("at least one field must be indexed"));
        }

        for (i, (name, _)) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|(other, _)| other == name) {
                return Err(FindexError::config(format!(
                    "duplicate field name: {name}"
                )));
            }
        }

        let default_limit = self.default_limit.unwrap_or(DEFAULT_LIMIT);
        if default_limit == 0 {
            return Err(FindexError::config("default limit must be non-zero"));
        }

        let tokenizer = self.tokenizer.unwrap_or_default();
        // Compile once here so a bad boundary pattern or matcher table
        // surfaces at construction, then discard; DocumentIndex builds its
        // own instance from the stored config.
        Tokenizer::new(&tokenizer)?;

        Ok(IndexConfig {
            fields: self.fields,
            tokenizer,
            default_limit,
        })
    }
}
