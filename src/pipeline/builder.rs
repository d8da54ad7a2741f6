// Pipeline builder and the fixed read, write and fetch stacks
use std::sync::Arc;
use std::time::Duration;

use super::core::Pipeline;
use super::keys;
use super::nodes::OnlineDownloader;
use super::registry::StepRegistry;
use crate::config::StackConfig;
use crate::error::{MiddlewareError, Result};
use crate::fetch::Fetcher;

/// Builds a pipeline from registered step names
pub struct PipelineBuilder {
    name: String,
    registry: Arc<StepRegistry>,
    step_names: Vec<String>,
}

impl PipelineBuilder {
    /// Create a builder for a pipeline named `name`
    pub fn new(name: impl Into<String>, registry: Arc<StepRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
            step_names: Vec::new(),
        }
    }

    /// Add a step by name; unknown names are rejected with the known ones listed
    pub fn add_step(mut self, name: impl Into<String>) -> Result<Self> {
        let step_name = name.into();
        if !self.registry.contains(&step_name) {
            return Err(MiddlewareError::invalid_config(format!(
                "Step '{}' not found in registry (known: {})",
                step_name,
                self.registry.list_steps().join(", ")
            )));
        }
        self.step_names.push(step_name);
        Ok(self)
    }

    /// Add several steps in order
    pub fn add_steps<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.add_step(name)?;
        }
        Ok(self)
    }

    /// Construct every step. Any configuration problem is reported here,
    /// before a single entry is processed.
    pub fn build(self, config: &StackConfig) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new(self.name);
        for name in &self.step_names {
            let step = self
                .registry
                .create(name, config)
                .ok_or_else(|| MiddlewareError::invalid_config(format!("Step '{}' not found", name)))??;
            pipeline = pipeline.add_step(step)?;
        }
        Ok(pipeline)
    }
}

/// Import direction: raw entries to structured values
pub fn build_read_stack(config: &StackConfig) -> Result<Pipeline> {
    PipelineBuilder::new("read", Arc::new(StepRegistry::with_defaults()))
        .add_steps(keys::READ_STACK.iter().copied())?
        .build(config)
}

/// Export direction: structured values back to enclosed LaTeX text
pub fn build_write_stack(config: &StackConfig) -> Result<Pipeline> {
    PipelineBuilder::new("write", Arc::new(StepRegistry::with_defaults()))
        .add_steps(keys::WRITE_STACK.iter().copied())?
        .build(config)
}

/// Document download for `online` entries, saving into the configured download directory
pub fn build_fetch_stack(config: &StackConfig, fetcher: Arc<dyn Fetcher>) -> Result<Pipeline> {
    let mut registry = StepRegistry::new();
    registry.register(keys::ONLINE_DOWNLOADER, move |config| {
        Ok(Box::new(OnlineDownloader::new(
            config.download_dir().to_path_buf(),
            fetcher.clone(),
            Duration::from_secs(config.load_timeout_secs),
        )))
    });

    PipelineBuilder::new("fetch", Arc::new(registry))
        .add_step(keys::ONLINE_DOWNLOADER)?
        .build(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_step_rejected() {
        let result = PipelineBuilder::new("test", Arc::new(StepRegistry::with_defaults()))
            .add_step("does_not_exist");
        let Err(MiddlewareError::InvalidConfig(message)) = result else {
            panic!("expected InvalidConfig");
        };
        assert!(message.contains("does_not_exist"));
        assert!(message.contains(keys::TITLE_STRIP));
    }

    #[test]
    fn test_stack_orders() {
        let config = StackConfig::new("/lib");
        assert_eq!(build_read_stack(&config).unwrap().step_keys(), keys::READ_STACK);
        assert_eq!(build_write_stack(&config).unwrap().step_keys(), keys::WRITE_STACK);
    }
}
