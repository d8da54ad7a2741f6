use async_trait::async_trait;
use tracing::debug;

use crate::core::{Block, Entry, ErrorBlock, Library};
use crate::error::{MiddlewareError, Result};

/// One transformation step. Steps hold only configuration supplied at
/// construction and are never mutated while a pipeline runs.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Unique key identifying the step inside a stack
    fn metadata_key(&self) -> &'static str;

    /// Transform one entry. The library is passed for lookups only; its
    /// blocks are detached while the step runs.
    async fn transform_entry(&self, entry: Entry, _library: &Library) -> Block {
        Block::Entry(entry)
    }

    /// Transform the whole library. Runs `transform_entry` over every block
    /// in order. Entries already wrapped in a failure keep being transformed,
    /// and new field errors are appended to their composite error.
    async fn transform(&self, mut library: Library) -> Result<Library> {
        let blocks = std::mem::take(&mut library.blocks);
        let mut transformed = Vec::with_capacity(blocks.len());

        for block in blocks {
            let next = match block {
                Block::Entry(entry) => self.transform_entry(entry, &library).await,
                Block::Failed(ErrorBlock { entry, mut error }) => {
                    match self.transform_entry(entry, &library).await {
                        Block::Entry(entry) => Block::Failed(ErrorBlock { entry, error }),
                        Block::Failed(failed) => {
                            error.extend(failed.error);
                            Block::Failed(ErrorBlock {
                                entry: failed.entry,
                                error,
                            })
                        }
                    }
                }
            };
            transformed.push(next);
        }

        library.blocks = transformed;
        Ok(library)
    }
}

/// Pipeline - an ordered stack of steps for one direction
pub struct Pipeline {
    name: String,
    steps: Vec<Box<dyn Middleware>>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_step(mut self, step: Box<dyn Middleware>) -> Result<Self> {
        let key = step.metadata_key();
        if self.steps.iter().any(|existing| existing.metadata_key() == key) {
            return Err(MiddlewareError::invalid_config(format!(
                "Step '{}' is already part of pipeline '{}'",
                key, self.name
            )));
        }
        debug!("Adding step '{}' to pipeline '{}'", key, self.name);
        self.steps.push(step);
        Ok(self)
    }

    /// Keys of the steps in execution order
    pub fn step_keys(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.metadata_key()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step over the whole library, one step at a time.
    /// Only a step-level error aborts the run; field errors are attached to entries.
    pub async fn execute(&self, mut library: Library) -> Result<Library> {
        debug!(
            "Executing pipeline '{}' with {} steps over {} blocks",
            self.name,
            self.steps.len(),
            library.len()
        );

        for (index, step) in self.steps.iter().enumerate() {
            debug!("Running step {}: '{}'", index + 1, step.metadata_key());
            library = step.transform(library).await?;
            debug!(
                "Step '{}' done, {} failed blocks",
                step.metadata_key(),
                library.failed_blocks().count()
            );
        }

        debug!("Pipeline '{}' executed successfully", self.name);
        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Field;
    use crate::error::FieldError;
    use crate::pipeline::aggregate;

    struct Upper;

    #[async_trait]
    impl Middleware for Upper {
        fn metadata_key(&self) -> &'static str {
            "upper"
        }

        async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
            for field in &mut entry.fields {
                if let crate::core::FieldValue::Text(text) = &mut field.value {
                    *text = text.to_uppercase();
                }
            }
            Block::Entry(entry)
        }
    }

    struct RejectAll;

    #[async_trait]
    impl Middleware for RejectAll {
        fn metadata_key(&self) -> &'static str {
            "reject"
        }

        async fn transform_entry(&self, entry: Entry, _library: &Library) -> Block {
            let key = entry.key.clone();
            aggregate(entry, vec![Err(FieldError::new("reject", "title", key))])
        }
    }

    #[tokio::test]
    async fn test_steps_run_in_order() {
        let library = Library::from_entries(vec![Entry::new("article", "a").with_field("title", "x")]);
        let pipeline = Pipeline::new("test")
            .add_step(Box::new(RejectAll))
            .unwrap()
            .add_step(Box::new(Upper))
            .unwrap();
        assert_eq!(pipeline.step_keys(), vec!["reject", "upper"]);

        let library = pipeline.execute(library).await.unwrap();
        let block = &library.blocks[0];
        assert!(block.is_failed());
        // later steps still transform the wrapped entry
        assert_eq!(block.entry().text("title"), Some("X"));
    }

    #[tokio::test]
    async fn test_errors_accumulate_across_steps() {
        struct RejectAgain;

        #[async_trait]
        impl Middleware for RejectAgain {
            fn metadata_key(&self) -> &'static str {
                "reject_again"
            }

            async fn transform_entry(&self, entry: Entry, _library: &Library) -> Block {
                aggregate(entry, vec![Err(FieldError::new("reject_again", "year", "bad"))])
            }
        }

        let mut entry = Entry::new("article", "a");
        entry.set_field(Field::new("title", "x"));
        let pipeline = Pipeline::new("test")
            .add_step(Box::new(RejectAll))
            .unwrap()
            .add_step(Box::new(RejectAgain))
            .unwrap();

        let library = pipeline.execute(Library::from_entries(vec![entry])).await.unwrap();
        let error = library.blocks[0].error().unwrap();
        assert_eq!(error.len(), 2);
        assert_eq!(error.errors()[0].step, "reject");
        assert_eq!(error.errors()[1].step, "reject_again");
    }

    #[test]
    fn test_duplicate_step_rejected() {
        let result = Pipeline::new("test")
            .add_step(Box::new(Upper))
            .unwrap()
            .add_step(Box::new(Upper));
        assert!(matches!(result, Err(MiddlewareError::InvalidConfig(_))));
    }
}
