use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::entry::Entry;
use crate::error::PartialError;

/// An entry that one or more steps failed to fully transform.
/// The entry keeps every field that was transformed successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBlock {
    pub entry: Entry,
    pub error: PartialError,
}

/// One element of a library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Entry(Entry),
    Failed(ErrorBlock),
}

impl Block {
    /// The underlying entry, whether or not it is wrapped in a failure
    pub fn entry(&self) -> &Entry {
        match self {
            Self::Entry(entry) => entry,
            Self::Failed(failed) => &failed.entry,
        }
    }

    pub fn entry_mut(&mut self) -> &mut Entry {
        match self {
            Self::Entry(entry) => entry,
            Self::Failed(failed) => &mut failed.entry,
        }
    }

    pub fn key(&self) -> &str {
        &self.entry().key
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&PartialError> {
        match self {
            Self::Entry(_) => None,
            Self::Failed(failed) => Some(&failed.error),
        }
    }
}

impl From<Entry> for Block {
    fn from(entry: Entry) -> Self {
        Self::Entry(entry)
    }
}

/// Ordered collection of blocks plus the `@string` definitions they may reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// String macro definitions, keyed by lower-cased name
    #[serde(default, deserialize_with = "lowercase_names")]
    pub strings: IndexMap<String, String>,
}

fn lowercase_names<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| (name.to_lowercase(), value))
        .collect())
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        Self {
            blocks: entries.into_iter().map(Block::Entry).collect(),
            strings: IndexMap::new(),
        }
    }

    pub fn define_string(&mut self, name: &str, value: impl Into<String>) {
        self.strings.insert(name.to_lowercase(), value.into());
    }

    /// Case-insensitive lookup of a string definition
    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Entries that are not wrapped in a failure
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Entry(entry) => Some(entry),
            Block::Failed(_) => None,
        })
    }

    pub fn failed_blocks(&self) -> impl Iterator<Item = &ErrorBlock> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Failed(failed) => Some(failed),
            Block::Entry(_) => None,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.key() == key)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_names_case_insensitive_from_json() {
        let library: Library = serde_json::from_str(
            r#"{"blocks": [], "strings": {"JAP": "{Journal of Applied Physics}", "Acc": "x"}}"#,
        )
        .unwrap();
        assert_eq!(library.string("jap"), Some("{Journal of Applied Physics}"));
        assert_eq!(library.string("JaP"), Some("{Journal of Applied Physics}"));
        assert_eq!(library.string("ACC"), Some("x"));
        assert_eq!(library.strings.keys().collect::<Vec<_>>(), vec!["jap", "acc"]);
    }
}
