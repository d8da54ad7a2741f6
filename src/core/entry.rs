use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::name::StructuredName;

/// Value carried by a field. Steps change the variant as a record moves
/// between its serialized and normalized forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Plain or markup text, possibly still enclosed in `{}` or `""`
    Text(String),
    /// A resolved filesystem location
    Path(PathBuf),
    /// Co-authors separated but not yet decomposed
    People(Vec<String>),
    /// Decomposed personal names
    Names(Vec<StructuredName>),
    /// Tag set, kept in insertion order
    Tags(IndexSet<String>),
}

impl FieldValue {
    /// Short name of the variant, used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Path(_) => "path",
            Self::People(_) => "people",
            Self::Names(_) => "names",
            Self::Tags(_) => "tags",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<PathBuf> for FieldValue {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

#[derive(Deserialize)]
struct RawField {
    key: String,
    value: FieldValue,
}

/// A named attribute of an entry. Keys are case-insensitive and stored lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Field {
    key: String,
    pub value: FieldValue,
}

impl Field {
    /// For keys known at compile time; use `try_new` for untrusted input.
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let key = key.into().trim().to_lowercase();
        debug_assert!(!key.is_empty(), "field key must not be empty");
        Self {
            key,
            value: value.into(),
        }
    }

    pub fn try_new(key: impl Into<String>, value: impl Into<FieldValue>) -> Result<Self, String> {
        let key = key.into().trim().to_lowercase();
        if key.is_empty() {
            return Err("Field key must not be empty".to_string());
        }
        Ok(Self {
            key,
            value: value.into(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TryFrom<RawField> for Field {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        Self::try_new(raw.key, raw.value)
    }
}

/// One bibliographic record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Type tag, e.g. "online" or "article"
    pub entry_type: String,
    /// Citation key, unique within a library
    pub key: String,
    /// Fields in source order
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Entry {
    pub fn new(entry_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into().to_lowercase(),
            key: key.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.set_field(Field::new(key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        let key = key.to_lowercase();
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        let key = key.to_lowercase();
        self.fields.iter_mut().find(|field| field.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Replace the first field with the same key, or append
    pub fn set_field(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Convenience accessor for text fields
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|field| field.value.as_text())
    }
}
