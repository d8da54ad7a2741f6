/// Centralized error handling for bib-middleware
pub mod codec;
pub mod fetch;
pub mod middleware;
pub mod partial;

pub use codec::{CodecError, CodecResult};
pub use fetch::{FetchError, FetchResult};
pub use middleware::{MiddlewareError, Result};
pub use partial::{FieldError, PartialError};
