//! Field-level dispatch shared by the decoding and encoding steps.

use tracing::info;

use super::aggregate::FieldResult;
use super::select::should_skip;
use crate::codec::TextCodec;
use crate::core::{Entry, FieldValue, StructuredName};
use crate::error::FieldError;

/// Apply `codec` to every transformable field of `entry` not excluded by `skip_set`.
/// A failing field keeps its original text and yields an error; siblings are unaffected.
pub fn transform_fields(step: &str, entry: &mut Entry, skip_set: &[&str], codec: &dyn TextCodec) -> Vec<FieldResult> {
    let mut results = Vec::new();

    for field in &mut entry.fields {
        let key = field.key().to_string();
        if should_skip(&key, skip_set) {
            continue;
        }

        match &mut field.value {
            FieldValue::Text(text) => results.push(transform_text(step, &key, text, codec)),
            FieldValue::Names(names) => {
                for name in names.iter_mut() {
                    results.extend(transform_name(step, &key, name, codec));
                }
            }
            other => {
                info!(
                    "[{}] Cannot transform field {} with value kind {}",
                    step,
                    key,
                    other.kind()
                );
            }
        }
    }

    results
}

/// Apply `codec` to each part of a structured name in the fixed order
/// given, family, particle, suffix.
pub fn transform_name(step: &str, field_key: &str, name: &mut StructuredName, codec: &dyn TextCodec) -> Vec<FieldResult> {
    let mut results = Vec::new();
    for (part, values) in name.parts_mut() {
        for value in values.iter_mut() {
            let result = codec.apply(value).map(|decoded| *value = decoded).map_err(|e| {
                FieldError::new(step, field_key, format!("{} part '{}': {}", part, value, e))
            });
            results.push(result);
        }
    }
    results
}

fn transform_text(step: &str, key: &str, text: &mut String, codec: &dyn TextCodec) -> FieldResult {
    match codec.apply(text) {
        Ok(transformed) => {
            *text = transformed;
            Ok(())
        }
        Err(e) => Err(FieldError::new(step, key, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::SKIP_FIELDS;
    use crate::error::{CodecError, CodecResult};

    struct Shout;

    impl TextCodec for Shout {
        fn apply(&self, text: &str) -> CodecResult<String> {
            if let Some(offset) = text.find('!') {
                return Err(CodecError::UnexpectedClose(offset));
            }
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn test_skip_fields_untouched() {
        let mut entry = Entry::new("online", "k")
            .with_field("title", "title")
            .with_field("url", "http://x.org/a")
            .with_field("doi", "10.1/abc");
        let results = transform_fields("shout", &mut entry, SKIP_FIELDS, &Shout);
        assert_eq!(results.len(), 1);
        assert_eq!(entry.text("title"), Some("TITLE"));
        assert_eq!(entry.text("url"), Some("http://x.org/a"));
        assert_eq!(entry.text("doi"), Some("10.1/abc"));
    }

    #[test]
    fn test_name_parts_in_order() {
        let mut name = StructuredName {
            given: vec!["ok".into()],
            family: vec!["bad!".into()],
            particle: vec!["von!".into()],
            suffix: vec!["jr".into()],
        };
        let results = transform_name("shout", "author", &mut name, &Shout);
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().message.starts_with("family"));
        assert!(results[2].as_ref().unwrap_err().message.starts_with("particle"));
        assert_eq!(name.given, vec!["OK"]);
        assert_eq!(name.family, vec!["bad!"]);
        assert_eq!(name.suffix, vec!["JR"]);
    }

    #[test]
    fn test_other_kinds_left_alone() {
        let mut entry = Entry::new("article", "k");
        entry.set_field(crate::core::Field::new("keywords", FieldValue::People(vec!["a".into()])));
        let results = transform_fields("shout", &mut entry, SKIP_FIELDS, &Shout);
        assert!(results.is_empty());
        assert_eq!(entry.get("keywords").unwrap().value, FieldValue::People(vec!["a".into()]));
    }
}
