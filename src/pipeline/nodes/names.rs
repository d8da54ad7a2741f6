use async_trait::async_trait;
use tracing::debug;

use crate::config::constants::NAME_FIELDS;
use crate::core::{Block, Entry, FieldValue, Library, StructuredName};
use crate::error::FieldError;
use crate::pipeline::aggregate::{FieldResult, aggregate};
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

/// Split a name list on the word `and` (any case) outside of brace groups
pub fn split_coauthors(value: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut depth = 0usize;

    for ch in value.chars() {
        match ch {
            '{' => {
                depth += 1;
                word.push(ch);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                word.push(ch);
            }
            c if depth == 0 && c.is_whitespace() => push_word(&mut word, &mut current, &mut names),
            c => word.push(c),
        }
    }
    push_word(&mut word, &mut current, &mut names);
    if !current.is_empty() {
        names.push(current.join(" "));
    }
    names
}

fn push_word(word: &mut String, current: &mut Vec<String>, names: &mut Vec<String>) {
    if word.is_empty() {
        return;
    }
    if word.eq_ignore_ascii_case("and") {
        if !current.is_empty() {
            names.push(current.join(" "));
            current.clear();
        }
        word.clear();
    } else {
        current.push(std::mem::take(word));
    }
}

fn is_name_field(key: &str) -> bool {
    NAME_FIELDS.contains(&key)
}

/// `author`, `editor` and `translator` text into a list of people
pub struct SeparateCoAuthors;

#[async_trait]
impl Middleware for SeparateCoAuthors {
    fn metadata_key(&self) -> &'static str {
        keys::SEPARATE_COAUTHORS
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        for field in &mut entry.fields {
            if !is_name_field(field.key()) {
                continue;
            }
            if let FieldValue::Text(text) = &field.value {
                field.value = FieldValue::People(split_coauthors(text));
            }
        }
        Block::Entry(entry)
    }
}

/// Join a list of people back with ` and `
pub struct MergeCoAuthors;

#[async_trait]
impl Middleware for MergeCoAuthors {
    fn metadata_key(&self) -> &'static str {
        keys::MERGE_COAUTHORS
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        for field in &mut entry.fields {
            if let FieldValue::People(people) = &field.value {
                field.value = FieldValue::Text(people.join(" and "));
            }
        }
        Block::Entry(entry)
    }
}

/// Decompose each person into name parts. Values that are not a list of
/// people are left alone, and a name that cannot be split is reported
/// without touching the rest of the entry.
pub struct RelaxedSplitNameParts;

#[async_trait]
impl Middleware for RelaxedSplitNameParts {
    fn metadata_key(&self) -> &'static str {
        keys::RELAXED_SPLIT_NAME_PARTS
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        let mut results: Vec<FieldResult> = Vec::new();

        for field in &mut entry.fields {
            let FieldValue::People(people) = &field.value else {
                continue;
            };

            let split: Result<Vec<StructuredName>, FieldError> = people
                .iter()
                .map(|person| {
                    StructuredName::split(person).map_err(|e| {
                        FieldError::new(keys::RELAXED_SPLIT_NAME_PARTS, field.key(), e.to_string())
                    })
                })
                .collect();

            match split {
                Ok(names) => field.value = FieldValue::Names(names),
                Err(error) => {
                    debug!("Entry {}: keeping {} unsplit", entry.key, field.key());
                    results.push(Err(error));
                }
            }
        }

        aggregate(entry, results)
    }
}

/// Structured names back to `von Last, Jr, First` strings
pub struct MergeNameParts;

#[async_trait]
impl Middleware for MergeNameParts {
    fn metadata_key(&self) -> &'static str {
        keys::MERGE_NAME_PARTS
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        for field in &mut entry.fields {
            if let FieldValue::Names(names) = &field.value {
                let people = names.iter().map(StructuredName::merge_last_first).collect();
                field.value = FieldValue::People(people);
            }
        }
        Block::Entry(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_coauthors() {
        assert_eq!(
            split_coauthors("Knuth, Donald and Lamport, Leslie AND {Barnes and Noble}"),
            vec!["Knuth, Donald", "Lamport, Leslie", "{Barnes and Noble}"]
        );
        assert_eq!(split_coauthors("Alexander Anderson"), vec!["Alexander Anderson"]);
        assert!(split_coauthors("  ").is_empty());
    }

    #[tokio::test]
    async fn test_people_round_trip() {
        let entry = Entry::new("article", "k")
            .with_field("author", "Ludwig van Beethoven and Smith, Jr, John")
            .with_field("title", "A and B");
        let library = Library::new();

        let block = SeparateCoAuthors.transform_entry(entry, &library).await;
        assert_eq!(block.entry().text("title"), Some("A and B"));
        let block = RelaxedSplitNameParts.transform_entry(block.entry().clone(), &library).await;
        assert!(!block.is_failed());

        let FieldValue::Names(names) = &block.entry().get("author").unwrap().value else {
            panic!("names expected");
        };
        assert_eq!(names[0].particle, vec!["van"]);
        assert_eq!(names[1].suffix, vec!["Jr"]);

        let block = MergeNameParts.transform_entry(block.entry().clone(), &library).await;
        let block = MergeCoAuthors.transform_entry(block.entry().clone(), &library).await;
        assert_eq!(
            block.entry().text("author"),
            Some("van Beethoven, Ludwig and Smith, Jr, John")
        );
    }

    #[tokio::test]
    async fn test_bad_name_is_field_error() {
        let entry = Entry::new("article", "k")
            .with_field("author", FieldValue::People(vec!["a, b, c, d".into()]))
            .with_field("editor", FieldValue::People(vec!["Jane Doe".into()]));
        let block = RelaxedSplitNameParts.transform_entry(entry, &Library::new()).await;

        let error = block.error().unwrap();
        assert_eq!(error.len(), 1);
        assert_eq!(error.errors()[0].field, "author");
        assert!(matches!(block.entry().get("author").unwrap().value, FieldValue::People(_)));
        assert!(matches!(block.entry().get("editor").unwrap().value, FieldValue::Names(_)));
    }
}
