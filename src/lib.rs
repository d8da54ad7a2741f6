//! Field-level transformation of bibliographic libraries: LaTeX decoding and
//! encoding, name and path handling, and document download, arranged as
//! read and write stacks of steps.

pub mod cli;
pub mod codec;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod pipeline;

pub use crate::config::StackConfig;
pub use crate::core::{Block, Entry, Field, FieldValue, Library, StructuredName};
pub use crate::error::{MiddlewareError, Result};
pub use crate::pipeline::{Pipeline, build_fetch_stack, build_read_stack, build_write_stack};
