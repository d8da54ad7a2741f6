//! Document download boundary: the `Fetcher` contract, its HTTP
//! implementation and the store-to-disk rules.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::constants::{DOCUMENT_EXTENSION, KEY_SEPARATORS, USER_AGENT};
use crate::error::{FetchError, FetchResult};

/// Retrieves the raw bytes behind a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>>;
}

/// HTTP fetcher. The client is owned by the value and released when it drops.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> FetchResult<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Where the document for `key` is stored inside `target`
pub fn destination(target: &Path, key: &str) -> PathBuf {
    let name: String = key
        .chars()
        .map(|c| if KEY_SEPARATORS.contains(&c) { '_' } else { c })
        .collect();
    target.join(format!("{}.{}", name, DOCUMENT_EXTENSION))
}

/// What `store` did with a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Bytes written
    Written(usize),
    /// The destination was already there; nothing fetched or written
    AlreadyExists,
    /// The fetch returned no bytes; nothing written
    Empty,
}

/// Fetch `url` and save it to `dest`, waiting at most `timeout` for the fetch
pub async fn store(
    fetcher: &dyn Fetcher,
    url: &str,
    dest: &Path,
    timeout: Duration,
) -> FetchResult<StoreOutcome> {
    let is_document = dest
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
    if !is_document {
        return Err(FetchError::BadDestination {
            path: dest.to_path_buf(),
            expected: DOCUMENT_EXTENSION.to_string(),
        });
    }

    if dest.exists() {
        warn!("Destination already exists, not overwriting: {}", dest.display());
        return Ok(StoreOutcome::AlreadyExists);
    }

    let bytes = tokio::time::timeout(timeout, fetcher.fetch(url))
        .await
        .map_err(|_| FetchError::Timeout {
            url: url.to_string(),
            secs: timeout.as_secs(),
        })??;

    if bytes.is_empty() {
        warn!("Fetched nothing from {}", url);
        return Ok(StoreOutcome::Empty);
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, &bytes).await?;
    info!("Saved {} bytes to {}", bytes.len(), dest.display());

    Ok(StoreOutcome::Written(bytes.len()))
}
