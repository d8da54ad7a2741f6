// Integration tests for stack assembly
use bib_middleware::StackConfig;
use bib_middleware::codec::DecodeRuleSpec;
use bib_middleware::error::MiddlewareError;
use bib_middleware::pipeline::keys::*;
use bib_middleware::pipeline::{PipelineBuilder, StepRegistry, build_read_stack, build_write_stack};
use indexmap::IndexMap;
use std::sync::Arc;

fn position(keys: &[&str], key: &str) -> usize {
    keys.iter().position(|k| *k == key).unwrap()
}

#[test]
fn test_read_stack_order() {
    let pipeline = build_read_stack(&StackConfig::new("/lib")).unwrap();
    let keys = pipeline.step_keys();

    assert_eq!(keys.len(), 9);
    assert!(position(&keys, RESOLVE_STRING_REFERENCES) < position(&keys, LATEX_DECODING));
    assert!(position(&keys, LATEX_DECODING) < position(&keys, PARSE_TAGS));
    assert!(position(&keys, SEPARATE_COAUTHORS) < position(&keys, RELAXED_SPLIT_NAME_PARTS));
    assert_eq!(keys.last(), Some(&TITLE_STRIP));
}

#[test]
fn test_write_stack_order() {
    let pipeline = build_write_stack(&StackConfig::new("/lib")).unwrap();
    let keys = pipeline.step_keys();

    assert_eq!(keys.first(), Some(&MERGE_NAME_PARTS));
    assert!(position(&keys, MERGE_COAUTHORS) < position(&keys, LATEX_ENCODING));
    assert_eq!(keys.last(), Some(&ADD_ENCLOSING));
}

#[test]
fn test_bad_decode_rule_fails_before_processing() {
    let mut rules = IndexMap::new();
    rules.insert("broken".to_string(), DecodeRuleSpec::new("href", "%s and %s", false));
    let config = StackConfig::new("/lib").with_rules(rules);

    let result = build_read_stack(&config);
    assert!(matches!(result, Err(MiddlewareError::InvalidConfig(_))));
    // the write stack has no decoder and is unaffected
    assert!(build_write_stack(&config).is_ok());
}

#[test]
fn test_custom_rule_accepted() {
    let mut rules = IndexMap::new();
    rules.insert("links".to_string(), DecodeRuleSpec::new("href", "<%s>", true));
    let config = StackConfig::new("/lib").with_rules(rules);
    assert!(build_read_stack(&config).is_ok());
}

#[test]
fn test_unknown_codec_option_rejected() {
    let result = serde_json::from_str::<StackConfig>(
        r#"{"library_root": "/lib", "decode": {"keep_groups": true}}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_builder_with_partial_registry() {
    let registry = Arc::new(StepRegistry::with_defaults());
    let pipeline = PipelineBuilder::new("custom", registry)
        .add_steps([REMOVE_ENCLOSING, LATEX_DECODING])
        .unwrap()
        .build(&StackConfig::new("/lib"))
        .unwrap();
    assert_eq!(pipeline.name(), "custom");
    assert_eq!(pipeline.step_keys(), vec![REMOVE_ENCLOSING, LATEX_DECODING]);
}

#[test]
fn test_builder_rejects_repeated_step() {
    let registry = Arc::new(StepRegistry::with_defaults());
    let result = PipelineBuilder::new("custom", registry)
        .add_steps([PARSE_TAGS, PARSE_TAGS])
        .unwrap()
        .build(&StackConfig::new("/lib"));
    assert!(result.is_err());
}
