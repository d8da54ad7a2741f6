/// LaTeX codec error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unbalanced '{{' opened at offset {0}")]
    UnclosedGroup(usize),
    #[error("unexpected '}}' at offset {0}")]
    UnexpectedClose(usize),
    #[error("unterminated math mode opened at offset {0}")]
    UnterminatedMath(usize),
    #[error("dangling backslash at offset {0}")]
    DanglingEscape(usize),
    #[error("command '\\{command}' at offset {offset} has no argument")]
    MissingArgument { command: String, offset: usize },
    #[error("no LaTeX encoding for '{ch}' at offset {offset}")]
    Unencodable { ch: char, offset: usize },
}

impl CodecError {
    /// Byte offset into the source text where the failure was detected
    pub fn offset(&self) -> usize {
        match self {
            Self::UnclosedGroup(offset)
            | Self::UnexpectedClose(offset)
            | Self::UnterminatedMath(offset)
            | Self::DanglingEscape(offset) => *offset,
            Self::MissingArgument { offset, .. } | Self::Unencodable { offset, .. } => *offset,
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
