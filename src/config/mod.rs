//! Stack configuration, supplied once at construction and read-only afterwards
pub mod constants;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::codec::{DecodeOptions, DecodeRuleSpec, EncodeOptions, MathMode};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackConfig {
    /// Base directory for relative file references
    pub library_root: PathBuf,
    /// Decoder options for the read stack
    #[serde(default = "read_decode_options")]
    pub decode: DecodeOptions,
    /// Encoder options for the write stack
    #[serde(default)]
    pub encode: EncodeOptions,
    /// Extra decode rules, merged over the defaults by name
    #[serde(default)]
    pub rules: IndexMap<String, DecodeRuleSpec>,
    /// Where downloaded documents are stored; defaults to the library root
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default = "default_load_timeout")]
    pub load_timeout_secs: u64,
}

/// The read stack keeps braced groups and math source intact
fn read_decode_options() -> DecodeOptions {
    DecodeOptions {
        keep_braced_groups: true,
        math_mode: MathMode::Verbatim,
    }
}

fn default_load_timeout() -> u64 {
    constants::LOAD_TIMEOUT_SECS
}

impl StackConfig {
    pub fn new(library_root: impl Into<PathBuf>) -> Self {
        Self {
            library_root: library_root.into(),
            decode: read_decode_options(),
            encode: EncodeOptions::default(),
            rules: IndexMap::new(),
            download_dir: None,
            load_timeout_secs: default_load_timeout(),
        }
    }

    /// Load a JSON configuration file. Unknown keys are rejected.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_library_root(mut self, library_root: impl Into<PathBuf>) -> Self {
        self.library_root = library_root.into();
        self
    }

    pub fn with_rules(mut self, rules: IndexMap<String, DecodeRuleSpec>) -> Self {
        self.rules = rules;
        self
    }

    pub fn download_dir(&self) -> &Path {
        self.download_dir.as_deref().unwrap_or(&self.library_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: StackConfig = serde_json::from_str(r#"{"library_root": "/lib"}"#).unwrap();
        assert_eq!(config, StackConfig::new("/lib"));
        assert!(config.decode.keep_braced_groups);
        assert_eq!(config.download_dir(), Path::new("/lib"));
    }

    #[test]
    fn test_codec_options() {
        let config: StackConfig = serde_json::from_str(
            r#"{
                "library_root": "/lib",
                "decode": {"keep_braced_groups": false, "math_mode": "text"},
                "encode": {"unknown_char_policy": "fail"}
            }"#,
        )
        .unwrap();
        assert!(!config.decode.keep_braced_groups);
        assert_eq!(config.decode.math_mode, MathMode::Text);
        assert!(config.encode.keep_math);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = serde_json::from_str::<StackConfig>(r#"{"library_root": "/lib", "lib": 1}"#);
        assert!(result.is_err());
    }
}
