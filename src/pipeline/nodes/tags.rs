use async_trait::async_trait;
use indexmap::IndexSet;

use crate::config::constants::TAGS_FIELD;
use crate::core::{Block, Entry, FieldValue, Library};
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

/// Split the comma separated `tags` field into a tag set
pub struct ParseTags;

#[async_trait]
impl Middleware for ParseTags {
    fn metadata_key(&self) -> &'static str {
        keys::PARSE_TAGS
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        if let Some(field) = entry.get_mut(TAGS_FIELD) {
            if let FieldValue::Text(text) = &field.value {
                let tags: IndexSet<String> = text
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect();
                field.value = FieldValue::Tags(tags);
            }
        }
        Block::Entry(entry)
    }
}

/// Join a tag set back into one comma separated, sorted value
pub struct WriteTags;

#[async_trait]
impl Middleware for WriteTags {
    fn metadata_key(&self) -> &'static str {
        keys::WRITE_TAGS
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        for field in &mut entry.fields {
            if let FieldValue::Tags(tags) = &field.value {
                let mut sorted: Vec<String> = tags.iter().cloned().collect();
                sorted.sort_unstable();
                field.value = FieldValue::Text(sorted.join(","));
            }
        }
        Block::Entry(entry)
    }
}
