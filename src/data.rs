use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique key identifying a document in the index.
///
/// Keys are either integers or strings; the content pipeline decides which.
/// A key is unique across the index at any point in time: re-adding an
/// existing key updates the document instead of inserting a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocKey {
    Int(u64),
    Text(String),
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocKey::Int(n) => write!(f, "{n}"),
            DocKey::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for DocKey {
    fn from(v: u64) -> Self {
        DocKey::Int(v)
    }
}

impl From<u32> for DocKey {
    fn from(v: u32) -> Self {
        DocKey::Int(v as u64)
    }
}

impl From<String> for DocKey {
    fn from(v: String) -> Self {
        DocKey::Text(v)
    }
}

impl From<&str> for DocKey {
    fn from(v: &str) -> Self {
        DocKey::Text(v.to_string())
    }
}

/// The value type for fields in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),

    /// Text content; searchable when the field is configured as indexed.
    Text(String),
}

impl DataValue {
    /// Returns the text value if this is a Text variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Int64 variant.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DataValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value if this is a Float64 variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a Bool variant.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        DataValue::Text(v)
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        DataValue::Text(v.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        DataValue::Int64(v)
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        DataValue::Int64(v as i64)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Float64(v)
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        DataValue::Bool(v)
    }
}

/// A document submitted for indexing.
///
/// A document is a unique key, an optional partition tag (e.g. a locale),
/// and a collection of named fields. Whether a field is tokenized into the
/// index, stored for result enrichment, or both is decided by the
/// [`IndexConfig`](crate::index::config::IndexConfig), not by the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique key for the document.
    pub key: DocKey,

    /// Optional partition tag. A document carries at most one tag.
    pub tag: Option<String>,

    /// Field data.
    pub fields: HashMap<String, DataValue>,
}

impl Document {
    /// Create a new document with the given key.
    pub fn new(key: impl Into<DocKey>) -> Self {
        Self {
            key: key.into(),
            tag: None,
            fields: HashMap::new(),
        }
    }

    /// Set the partition tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a field to the document.
    pub fn add_field(mut self, name: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add a text field.
    pub fn add_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields
            .insert(name.into(), DataValue::Text(text.into()));
        self
    }

    /// Get a reference to a field's value.
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.fields.get(name)
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
