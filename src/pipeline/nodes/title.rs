use async_trait::async_trait;
use regex::Regex;

use crate::config::constants::TITLE_FIELDS;
use crate::core::{Block, Entry, FieldValue, Library};
use crate::error::{MiddlewareError, Result};
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

/// Trim titles and collapse internal whitespace runs
pub struct TitleStrip {
    whitespace: Regex,
}

impl TitleStrip {
    pub fn new() -> Result<Self> {
        let whitespace = Regex::new(r"\s+")
            .map_err(|e| MiddlewareError::step(keys::TITLE_STRIP, e.to_string()))?;
        Ok(Self { whitespace })
    }
}

#[async_trait]
impl Middleware for TitleStrip {
    fn metadata_key(&self) -> &'static str {
        keys::TITLE_STRIP
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        for field in &mut entry.fields {
            if !TITLE_FIELDS.contains(&field.key()) {
                continue;
            }
            if let FieldValue::Text(text) = &mut field.value {
                *text = self.whitespace.replace_all(text.trim(), " ").into_owned();
            }
        }
        Block::Entry(entry)
    }
}
