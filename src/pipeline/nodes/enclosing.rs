use async_trait::async_trait;

use crate::core::{Block, Entry, FieldValue, Library};
use crate::error::FieldError;
use crate::pipeline::aggregate::{FieldResult, aggregate};
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

/// Inner text of a value wrapped in one brace pair, where the opening brace
/// is closed by the final character. `{a} and {b}` is not enclosed.
pub fn strip_braces(value: &str) -> Option<&str> {
    if !value.starts_with('{') || !value.ends_with('}') || value.len() < 2 {
        return None;
    }
    let mut depth = 0usize;
    let mut escaped = false;
    for (index, ch) in value.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (index == value.len() - 1).then(|| &value[1..index]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Inner text of a value wrapped in `{}` or `""`
pub fn strip_enclosing(value: &str) -> Option<&str> {
    if let Some(inner) = strip_braces(value) {
        return Some(inner);
    }
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Some(&value[1..value.len() - 1]);
    }
    None
}

/// Strip one enclosing `{}` or `""` pair from text values
pub struct RemoveEnclosing;

#[async_trait]
impl Middleware for RemoveEnclosing {
    fn metadata_key(&self) -> &'static str {
        keys::REMOVE_ENCLOSING
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        for field in &mut entry.fields {
            if let FieldValue::Text(text) = &mut field.value {
                if let Some(inner) = strip_enclosing(text) {
                    *text = inner.to_string();
                }
            }
        }
        Block::Entry(entry)
    }
}

/// Wrap every text value in `{}`. Values of any other kind are reported,
/// since the steps before this one should have serialized them.
pub struct AddEnclosing;

#[async_trait]
impl Middleware for AddEnclosing {
    fn metadata_key(&self) -> &'static str {
        keys::ADD_ENCLOSING
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        let mut results: Vec<FieldResult> = Vec::new();
        for field in &mut entry.fields {
            let key = field.key().to_string();
            match &mut field.value {
                FieldValue::Text(text) => *text = format!("{{{}}}", text),
                other => results.push(Err(FieldError::new(
                    keys::ADD_ENCLOSING,
                    key,
                    format!("cannot enclose a value of kind {}", other.kind()),
                ))),
            }
        }
        aggregate(entry, results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_braces() {
        assert_eq!(strip_braces("{Title}"), Some("Title"));
        assert_eq!(strip_braces("{{DNA} study}"), Some("{DNA} study"));
        assert_eq!(strip_braces("{a} and {b}"), None);
        assert_eq!(strip_braces("{unmatched"), None);
        assert_eq!(strip_braces("unmatched}"), None);
        assert_eq!(strip_braces(r"{a\}"), None);
        assert_eq!(strip_braces("{}"), Some(""));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_enclosing("\"Title\""), Some("Title"));
        assert_eq!(strip_enclosing("jan"), None);
    }

    #[tokio::test]
    async fn test_remove_then_add() {
        let library = Library::new();
        let entry = Entry::new("article", "k")
            .with_field("title", "{A Title}")
            .with_field("year", "2020");
        let Block::Entry(entry) = RemoveEnclosing.transform_entry(entry, &library).await else {
            panic!("remove_enclosing never fails");
        };
        assert_eq!(entry.text("title"), Some("A Title"));
        assert_eq!(entry.text("year"), Some("2020"));

        let Block::Entry(entry) = AddEnclosing.transform_entry(entry, &library).await else {
            panic!("text values enclose cleanly");
        };
        assert_eq!(entry.text("title"), Some("{A Title}"));
        assert_eq!(entry.text("year"), Some("{2020}"));
    }

    #[tokio::test]
    async fn test_add_enclosing_reports_unserialized_values() {
        let entry = Entry::new("article", "k")
            .with_field("title", "T")
            .with_field("file", std::path::PathBuf::from("/x.pdf"));
        let block = AddEnclosing.transform_entry(entry, &Library::new()).await;
        let error = block.error().unwrap();
        assert_eq!(error.errors()[0].field, "file");
        assert_eq!(block.entry().text("title"), Some("{T}"));
    }
}
