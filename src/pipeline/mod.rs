// Pipeline module: step contract, stack assembly and the built-in steps

pub mod aggregate;
pub mod builder;
pub mod codec_step;
pub mod core;
pub mod keys;
pub mod nodes;
pub mod registry;
pub mod select;

// Re-export core types
pub use aggregate::{FieldResult, aggregate};
pub use builder::*;
pub use self::core::*;
pub use registry::*;
pub use select::should_skip;
