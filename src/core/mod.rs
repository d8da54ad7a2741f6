// Record model shared by every step

pub mod entry;
pub mod library;
pub mod name;

pub use entry::{Entry, Field, FieldValue};
pub use library::{Block, ErrorBlock, Library};
pub use name::{NameError, StructuredName};
