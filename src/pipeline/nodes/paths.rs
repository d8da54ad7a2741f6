use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use crate::config::constants::PATH_FIELD_MARKERS;
use crate::core::{Block, Entry, FieldValue, Library};
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

fn is_path_field(key: &str) -> bool {
    PATH_FIELD_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Resolve a file reference by its first component: absolute paths are kept,
/// `~` is expanded to the home directory, anything else is joined to the library root.
pub fn resolve_path(value: &Path, library_root: &Path) -> PathBuf {
    match value.components().next() {
        Some(Component::RootDir) | Some(Component::Prefix(_)) => value.to_path_buf(),
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(value.strip_prefix("~").unwrap_or(value)),
            None => {
                warn!("No home directory to expand {}", value.display());
                value.to_path_buf()
            }
        },
        _ => library_root.join(value),
    }
}

/// Portable form of a resolved path: relative to the library root when
/// below it, `~/...` when below the home directory, absolute otherwise.
pub fn portable_path(value: &Path, library_root: &Path) -> String {
    if let Ok(relative) = value.strip_prefix(library_root) {
        return relative.to_string_lossy().to_string();
    }
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = value.strip_prefix(&home) {
            return Path::new("~").join(relative).to_string_lossy().to_string();
        }
    }
    value.to_string_lossy().to_string()
}

/// Turn `file`/`look_in` fields into resolved paths, warning about missing files
pub struct ParsePaths {
    library_root: PathBuf,
}

impl ParsePaths {
    pub fn new(library_root: impl Into<PathBuf>) -> Self {
        Self {
            library_root: library_root.into(),
        }
    }
}

#[async_trait]
impl Middleware for ParsePaths {
    fn metadata_key(&self) -> &'static str {
        keys::PARSE_PATHS
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        for field in &mut entry.fields {
            if !is_path_field(field.key()) {
                continue;
            }

            let resolved = match &field.value {
                FieldValue::Text(text) if text.trim().is_empty() => {
                    debug!("Entry {}: empty {} field", entry.key, field.key());
                    continue;
                }
                FieldValue::Text(text) => resolve_path(Path::new(text.trim()), &self.library_root),
                FieldValue::Path(path) => resolve_path(path, &self.library_root),
                _ => continue,
            };

            if !resolved.exists() {
                warn!("On import file does not exist: {}", resolved.display());
            }
            field.value = FieldValue::Path(resolved);
        }
        Block::Entry(entry)
    }
}

/// Turn resolved paths back into portable text
pub struct WritePaths {
    library_root: PathBuf,
}

impl WritePaths {
    pub fn new(library_root: impl Into<PathBuf>) -> Self {
        Self {
            library_root: library_root.into(),
        }
    }
}

#[async_trait]
impl Middleware for WritePaths {
    fn metadata_key(&self) -> &'static str {
        keys::WRITE_PATHS
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        for field in &mut entry.fields {
            if let FieldValue::Path(path) = &field.value {
                field.value = FieldValue::Text(portable_path(path, &self.library_root));
            }
        }
        Block::Entry(entry)
    }
}
