/// Fetch boundary error types
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server answered {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("Timed out after {secs}s fetching {url}")]
    Timeout { url: String, secs: u64 },
    #[error("Destination is not a .{expected} file: {path}")]
    BadDestination { path: PathBuf, expected: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;
