/// Per-field and per-entry recoverable failures
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single field that a step could not transform
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("[{step}] field '{field}': {message}")]
pub struct FieldError {
    pub step: String,
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(step: impl Into<String>, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// An error signal carrying no message counts as no error
    pub fn is_empty(&self) -> bool {
        self.message.trim().is_empty()
    }
}

/// Composite failure of one entry, preserving every field error in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialError {
    errors: Vec<FieldError>,
}

impl PartialError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Merge another composite failure into this one, keeping order
    pub fn extend(&mut self, other: PartialError) {
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for PartialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for PartialError {}
