use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{MiddlewareError, Result};

/// How `$...$`, `$$...$$`, `\(...\)` and `\[...\]` are decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MathMode {
    /// Decode the contents as text and drop the delimiters
    #[default]
    Text,
    /// Decode the contents and keep the delimiters
    WithDelimiters,
    /// Keep the math source untouched
    Verbatim,
    /// Drop math entirely
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeOptions {
    /// Keep `{...}` around groups of two or more characters
    pub keep_braced_groups: bool,
    pub math_mode: MathMode,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            keep_braced_groups: false,
            math_mode: MathMode::Text,
        }
    }
}

/// What the encoder does with a character it has no LaTeX spelling for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCharPolicy {
    #[default]
    Keep,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeOptions {
    /// Copy `$...$` through without escaping
    pub keep_math: bool,
    /// Wrap values that look like URLs in `\url{...}`
    pub enclose_urls: bool,
    pub unknown_char_policy: UnknownCharPolicy,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            keep_math: true,
            enclose_urls: false,
            unknown_char_policy: UnknownCharPolicy::Keep,
        }
    }
}

/// A one-argument macro rewritten through a template, e.g. `\url{x}` -> `x`.
/// The template holds at most one `%s`, replaced by the argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeRuleSpec {
    #[serde(rename = "macro")]
    pub macro_name: String,
    pub replacement: String,
    /// Copy the argument without decoding it
    #[serde(default)]
    pub verbatim: bool,
}

impl DecodeRuleSpec {
    pub fn new(macro_name: &str, replacement: &str, verbatim: bool) -> Self {
        Self {
            macro_name: macro_name.to_string(),
            replacement: replacement.to_string(),
            verbatim,
        }
    }

    /// Reject rule shapes the decoder cannot apply
    pub fn validate(&self, rule_name: &str) -> Result<()> {
        if self.macro_name.is_empty() || !self.macro_name.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MiddlewareError::invalid_config(format!(
                "Bad decode rule '{}': macro name '{}' must be ASCII letters",
                rule_name, self.macro_name
            )));
        }
        if self.replacement.matches("%s").count() > 1 {
            return Err(MiddlewareError::invalid_config(format!(
                "Bad decode rule '{}': replacement '{}' has more than one %s",
                rule_name, self.replacement
            )));
        }
        Ok(())
    }

    pub fn apply(&self, argument: &str) -> String {
        self.replacement.replace("%s", argument)
    }
}

/// Rules every decoder starts from
pub fn default_decode_rules() -> IndexMap<String, DecodeRuleSpec> {
    let mut rules = IndexMap::new();
    rules.insert(
        "simplify-urls".to_string(),
        DecodeRuleSpec::new("url", "%s", true),
    );
    for style in [
        "emph", "textit", "textbf", "textsc", "texttt", "textrm", "textsf", "textsl", "textup",
        "textmd", "textnormal", "mbox", "text",
    ] {
        rules.insert(format!("style-{}", style), DecodeRuleSpec::new(style, "%s", false));
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_mapping() {
        let options: DecodeOptions =
            serde_json::from_str(r#"{"keep_braced_groups": true, "math_mode": "verbatim"}"#)
                .unwrap();
        assert!(options.keep_braced_groups);
        assert_eq!(options.math_mode, MathMode::Verbatim);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let result = serde_json::from_str::<DecodeOptions>(r#"{"keep_math_mode": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rule_validation() {
        assert!(DecodeRuleSpec::new("url", "%s", true).validate("ok").is_ok());
        assert!(DecodeRuleSpec::new("", "%s", false).validate("empty").is_err());
        assert!(DecodeRuleSpec::new("url", "%s %s", false).validate("twice").is_err());
    }
}
