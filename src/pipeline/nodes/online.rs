use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::constants::{FILE_FIELD, ONLINE_ENTRY_TYPE, URL_FIELD};
use crate::core::{Block, Entry, Field, FieldValue, Library};
use crate::fetch::{self, Fetcher, StoreOutcome};
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

/// Download the document behind an `online` entry's url and record where it
/// was saved. Download problems are logged and leave the entry as it was.
pub struct OnlineDownloader {
    target: PathBuf,
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
}

impl OnlineDownloader {
    pub fn new(target: impl Into<PathBuf>, fetcher: Arc<dyn Fetcher>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            fetcher,
            timeout,
        }
    }
}

#[async_trait]
impl Middleware for OnlineDownloader {
    fn metadata_key(&self) -> &'static str {
        keys::ONLINE_DOWNLOADER
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        if entry.entry_type != ONLINE_ENTRY_TYPE {
            info!("Entry {} is not {}, nothing to download", entry.key, ONLINE_ENTRY_TYPE);
            return Block::Entry(entry);
        }
        let Some(url) = entry.text(URL_FIELD).map(str::to_string) else {
            warn!("Entry {} has no url to download", entry.key);
            return Block::Entry(entry);
        };
        if entry.contains(FILE_FIELD) {
            info!("Entry {} already has a file", entry.key);
            return Block::Entry(entry);
        }

        let dest = fetch::destination(&self.target, &entry.key);
        match fetch::store(self.fetcher.as_ref(), &url, &dest, self.timeout).await {
            Ok(StoreOutcome::Written(_)) => {
                entry.set_field(Field::new(FILE_FIELD, FieldValue::Path(dest)));
            }
            Ok(outcome) => info!("Entry {}: download {:?}, left unchanged", entry.key, outcome),
            Err(e) => warn!("Entry {}: download from {} failed: {}", entry.key, url, e),
        }
        Block::Entry(entry)
    }
}
