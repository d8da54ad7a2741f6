use async_trait::async_trait;
use std::collections::HashSet;
use tracing::warn;

use crate::config::constants::DUPLICATE_SUFFIX;
use crate::core::Library;
use crate::error::Result;
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

/// Rename entries whose key repeats an earlier key to `{key}_dup{n}`
pub struct DuplicateKeys;

#[async_trait]
impl Middleware for DuplicateKeys {
    fn metadata_key(&self) -> &'static str {
        keys::DUPLICATE_KEYS
    }

    async fn transform(&self, mut library: Library) -> Result<Library> {
        let mut seen: HashSet<String> = HashSet::new();

        for block in &mut library.blocks {
            let key = block.key().to_string();
            if seen.insert(key.clone()) {
                continue;
            }

            let mut counter = 1;
            let mut renamed = format!("{}{}{}", key, DUPLICATE_SUFFIX, counter);
            while seen.contains(&renamed) {
                counter += 1;
                renamed = format!("{}{}{}", key, DUPLICATE_SUFFIX, counter);
            }

            warn!("Duplicate entry key '{}' renamed to '{}'", key, renamed);
            seen.insert(renamed.clone());
            block.entry_mut().key = renamed;
        }

        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Entry;

    #[tokio::test]
    async fn test_duplicates_renamed_in_order() {
        let library = Library::from_entries(vec![
            Entry::new("article", "smith"),
            Entry::new("article", "smith"),
            Entry::new("article", "jones"),
            Entry::new("article", "smith"),
        ]);
        let library = DuplicateKeys.transform(library).await.unwrap();
        let keys: Vec<&str> = library.blocks.iter().map(|b| b.key()).collect();
        assert_eq!(keys, vec!["smith", "smith_dup1", "jones", "smith_dup2"]);
    }
}
