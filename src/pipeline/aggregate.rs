/// Error aggregator: the single point where a step's per-field results
/// become either a plain entry or an error-wrapped one.
use crate::core::{Block, Entry, ErrorBlock};
use crate::error::{FieldError, PartialError};

/// Outcome of transforming one field (or one part of a structured name)
pub type FieldResult = std::result::Result<(), FieldError>;

pub fn aggregate(entry: Entry, results: impl IntoIterator<Item = FieldResult>) -> Block {
    let errors = results.into_iter().fold(Vec::new(), |mut errors, result| {
        if let Err(error) = result {
            if !error.is_empty() {
                errors.push(error);
            }
        }
        errors
    });

    if errors.is_empty() {
        Block::Entry(entry)
    } else {
        Block::Failed(ErrorBlock {
            entry,
            error: PartialError::new(errors),
        })
    }
}
