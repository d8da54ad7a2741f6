// Step registry: named factories building configured steps
use std::collections::HashMap;

use super::core::Middleware;
use super::keys;
use super::nodes::*;
use crate::codec::{LatexDecoder, LatexEncoder};
use crate::config::StackConfig;
use crate::error::Result;

/// Factory building one step from the stack configuration
pub type StepFactory = Box<dyn Fn(&StackConfig) -> Result<Box<dyn Middleware>> + Send + Sync>;

/// Named step factories
pub struct StepRegistry {
    steps: HashMap<String, StepFactory>,
}

impl StepRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            steps: HashMap::new(),
        }
    }

    /// Registry holding every step of the read and write stacks
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(keys::DUPLICATE_KEYS, |_| Ok(Box::new(DuplicateKeys)));
        registry.register(keys::RESOLVE_STRING_REFERENCES, |_| {
            Ok(Box::new(ResolveStringReferences::new()?))
        });
        registry.register(keys::REMOVE_ENCLOSING, |_| Ok(Box::new(RemoveEnclosing)));
        registry.register(keys::LATEX_DECODING, |config| {
            let decoder = LatexDecoder::with_rules(config.decode.clone(), &config.rules)?;
            Ok(Box::new(LatexReader::new(decoder)))
        });
        registry.register(keys::PARSE_PATHS, |config| {
            Ok(Box::new(ParsePaths::new(config.library_root.clone())))
        });
        registry.register(keys::PARSE_TAGS, |_| Ok(Box::new(ParseTags)));
        registry.register(keys::SEPARATE_COAUTHORS, |_| Ok(Box::new(SeparateCoAuthors)));
        registry.register(keys::RELAXED_SPLIT_NAME_PARTS, |_| {
            Ok(Box::new(RelaxedSplitNameParts))
        });
        registry.register(keys::TITLE_STRIP, |_| Ok(Box::new(TitleStrip::new()?)));

        registry.register(keys::MERGE_NAME_PARTS, |_| Ok(Box::new(MergeNameParts)));
        registry.register(keys::MERGE_COAUTHORS, |_| Ok(Box::new(MergeCoAuthors)));
        registry.register(keys::LATEX_ENCODING, |config| {
            Ok(Box::new(LatexWriter::new(LatexEncoder::new(config.encode.clone()))))
        });
        registry.register(keys::WRITE_TAGS, |_| Ok(Box::new(WriteTags)));
        registry.register(keys::WRITE_PATHS, |config| {
            Ok(Box::new(WritePaths::new(config.library_root.clone())))
        });
        registry.register(keys::ADD_ENCLOSING, |_| Ok(Box::new(AddEnclosing)));

        registry
    }

    /// Register a factory under a step name, replacing any earlier one
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&StackConfig) -> Result<Box<dyn Middleware>> + Send + Sync + 'static,
    {
        self.steps.insert(name.into(), Box::new(factory));
    }

    /// Build a step by name; `None` when nothing is registered under it
    pub fn create(&self, name: &str, config: &StackConfig) -> Option<Result<Box<dyn Middleware>>> {
        self.steps.get(name).map(|factory| factory(config))
    }

    /// Check if a step is registered
    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Registered step names, sorted
    pub fn list_steps(&self) -> Vec<String> {
        let mut names: Vec<String> = self.steps.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_both_stacks() {
        let registry = StepRegistry::with_defaults();
        for key in keys::READ_STACK.iter().chain(keys::WRITE_STACK) {
            assert!(registry.contains(key), "missing {}", key);
        }
        assert!(!registry.contains(keys::ONLINE_DOWNLOADER));
    }

    #[test]
    fn test_factory_reports_config_errors() {
        let config = StackConfig::new("/lib").with_rules(
            [("bad".to_string(), crate::codec::DecodeRuleSpec::new("u-rl", "%s", false))]
                .into_iter()
                .collect(),
        );
        let registry = StepRegistry::with_defaults();
        assert!(registry.create(keys::LATEX_DECODING, &config).unwrap().is_err());
        assert!(registry.create("nope", &config).is_none());
    }

    #[test]
    fn test_list_steps_sorted() {
        let mut registry = StepRegistry::new();
        registry.register("b", |_| Ok(Box::new(DuplicateKeys)));
        registry.register("a", |_| Ok(Box::new(AddEnclosing)));
        assert_eq!(registry.list_steps(), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
    }
}
