use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::enclosing::strip_enclosing;
use crate::core::{Block, Entry, FieldValue, Library};
use crate::error::{MiddlewareError, Result};
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

/// Substitute `@string` references. A value is resolved when it is an
/// unenclosed reference or a `#` concatenation of references, numbers and
/// enclosed literals; the result becomes one `{...}` literal. Values with an
/// unknown reference are left as they are.
pub struct ResolveStringReferences {
    numeric: Regex,
}

impl ResolveStringReferences {
    pub fn new() -> Result<Self> {
        let numeric = Regex::new(r"^-?\d+$")
            .map_err(|e| MiddlewareError::step(keys::RESOLVE_STRING_REFERENCES, e.to_string()))?;
        Ok(Self { numeric })
    }

    fn resolve(&self, value: &str, library: &Library) -> Option<String> {
        let parts = split_concatenation(value)?;
        if let [single] = parts.as_slice() {
            if strip_enclosing(single).is_some() || self.numeric.is_match(single) {
                return None;
            }
        }

        let mut resolved = String::new();
        for part in &parts {
            if let Some(literal) = strip_enclosing(part) {
                resolved.push_str(literal);
            } else if self.numeric.is_match(part) {
                resolved.push_str(part);
            } else if let Some(definition) = library.string(part) {
                resolved.push_str(strip_enclosing(definition).unwrap_or(definition));
            } else {
                debug!("Unknown string reference '{}'", part);
                return None;
            }
        }

        Some(format!("{{{}}}", resolved))
    }
}

#[async_trait]
impl Middleware for ResolveStringReferences {
    fn metadata_key(&self) -> &'static str {
        keys::RESOLVE_STRING_REFERENCES
    }

    async fn transform_entry(&self, mut entry: Entry, library: &Library) -> Block {
        for field in &mut entry.fields {
            if let FieldValue::Text(text) = &mut field.value {
                if let Some(resolved) = self.resolve(text, library) {
                    *text = resolved;
                }
            }
        }
        Block::Entry(entry)
    }
}

/// Split on `#` outside braces and quotes; `None` for empty parts
fn split_concatenation(value: &str) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quoted = false;

    for ch in value.chars() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '"' if depth == 0 => quoted = !quoted,
            '#' if depth == 0 && !quoted => {
                parts.push(std::mem::take(&mut current).trim().to_string());
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    parts.push(current.trim().to_string());

    if parts.iter().any(String::is_empty) {
        return None;
    }
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Library {
        let mut library = Library::new();
        library.define_string("jan", "{January}");
        library.define_string("PUB", "Physics Press");
        library
    }

    async fn run(value: &str) -> String {
        let step = ResolveStringReferences::new().unwrap();
        let entry = Entry::new("article", "k").with_field("month", value);
        let block = step.transform_entry(entry, &library()).await;
        block.entry().text("month").unwrap().to_string()
    }

    #[tokio::test]
    async fn test_plain_reference() {
        assert_eq!(run("jan").await, "{January}");
        assert_eq!(run("pub").await, "{Physics Press}");
    }

    #[tokio::test]
    async fn test_concatenation() {
        assert_eq!(run("jan # { 1st}").await, "{January 1st}");
        assert_eq!(run("\"Early \" # jan").await, "{Early January}");
    }

    #[tokio::test]
    async fn test_literals_and_unknowns_untouched() {
        assert_eq!(run("{jan}").await, "{jan}");
        assert_eq!(run("2020").await, "2020");
        assert_eq!(run("feb").await, "feb");
        assert_eq!(run("{C# in depth}").await, "{C# in depth}");
    }
}
