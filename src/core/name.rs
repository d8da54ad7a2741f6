//! Decomposed personal names and the BibTeX rules for splitting and merging them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One decomposed personal name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredName {
    #[serde(default)]
    pub given: Vec<String>,
    #[serde(default)]
    pub family: Vec<String>,
    /// The "von" part
    #[serde(default)]
    pub particle: Vec<String>,
    /// The "jr" part
    #[serde(default)]
    pub suffix: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("empty name")]
    Empty,
    #[error("too many commas in '{0}'")]
    TooManyCommas(String),
    #[error("unbalanced braces in '{0}'")]
    Unbalanced(String),
}

impl StructuredName {
    /// Mutable access to the four parts, always in the order
    /// given, family, particle, suffix.
    pub fn parts_mut(&mut self) -> [(&'static str, &mut Vec<String>); 4] {
        [
            ("given", &mut self.given),
            ("family", &mut self.family),
            ("particle", &mut self.particle),
            ("suffix", &mut self.suffix),
        ]
    }

    /// "von Last, Jr, First", omitting empty parts
    pub fn merge_last_first(&self) -> String {
        let last = self
            .particle
            .iter()
            .chain(self.family.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        let given = self.given.join(" ");

        if !self.suffix.is_empty() {
            return format!("{}, {}, {}", last, self.suffix.join(" "), given)
                .trim_end()
                .to_string();
        }
        if given.is_empty() {
            last
        } else {
            format!("{}, {}", last, given)
        }
    }

    /// Split a single name written in any of the three BibTeX forms:
    /// `First von Last`, `von Last, First` or `von Last, Jr, First`.
    pub fn split(name: &str) -> Result<Self, NameError> {
        let sections = split_sections(name)?;
        let sections: Vec<Vec<String>> = sections.iter().map(|s| words(s)).collect();

        if sections.iter().all(|words| words.is_empty()) {
            return Err(NameError::Empty);
        }

        let mut parts = Self::default();
        match sections.as_slice() {
            [all] => {
                let (last_word, rest) = match all.split_last() {
                    Some(split) => split,
                    None => return Err(NameError::Empty),
                };
                match rest.iter().position(|w| is_von(w)) {
                    Some(start) => {
                        let end = rest.iter().rposition(|w| is_von(w)).unwrap_or(start);
                        parts.given = rest[..start].to_vec();
                        parts.particle = rest[start..=end].to_vec();
                        parts.family = rest[end + 1..].to_vec();
                        parts.family.push(last_word.clone());
                    }
                    None => {
                        parts.given = rest.to_vec();
                        parts.family = vec![last_word.clone()];
                    }
                }
            }
            [last, first] => {
                split_von_last(last, &mut parts);
                parts.given = first.clone();
            }
            [last, jr, first] => {
                split_von_last(last, &mut parts);
                parts.suffix = jr.clone();
                parts.given = first.clone();
            }
            _ => return Err(NameError::TooManyCommas(name.to_string())),
        }

        Ok(parts)
    }
}

fn split_von_last(words: &[String], parts: &mut StructuredName) {
    let Some((last_word, rest)) = words.split_last() else {
        return;
    };
    match rest.iter().rposition(|w| is_von(w)) {
        Some(end) => {
            parts.particle = rest[..=end].to_vec();
            parts.family = rest[end + 1..].to_vec();
        }
        None => parts.family = rest.to_vec(),
    }
    parts.family.push(last_word.clone());
}

/// Split on commas outside of brace groups
fn split_sections(name: &str) -> Result<Vec<String>, NameError> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in name.chars() {
        match ch {
            '{' => {
                depth += 1;
                current.push(ch);
            }
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| NameError::Unbalanced(name.to_string()))?;
                current.push(ch);
            }
            ',' if depth == 0 => sections.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    if depth != 0 {
        return Err(NameError::Unbalanced(name.to_string()));
    }
    sections.push(current);
    Ok(sections)
}

/// Split on whitespace and `~` outside of brace groups
fn words(section: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in section.chars() {
        match ch {
            '{' => {
                depth += 1;
                current.push(ch);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if depth == 0 && (c.is_whitespace() || c == '~') => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// A word belongs to the "von" part when its first cased letter at brace
/// depth zero is lowercase. Groups starting with a control sequence
/// (`{\"u}ber`) are looked into; other groups are caseless.
fn is_von(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch.is_alphabetic() {
            return ch.is_lowercase();
        }
        if ch == '{' {
            if chars.get(i + 1) == Some(&'\\') {
                // skip the control sequence name, then look for the first letter
                let mut j = i + 2;
                while j < chars.len() && chars[j].is_ascii_alphabetic() {
                    j += 1;
                }
                if j == i + 2 {
                    j = (j + 1).min(chars.len());
                }
                if let Some(letter) = chars[j..]
                    .iter()
                    .take_while(|c| **c != '}')
                    .find(|c| c.is_alphabetic())
                {
                    return letter.is_lowercase();
                }
                let macro_name: String = chars[i + 2..j].iter().collect();
                return macro_name
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_lowercase());
            }
            let mut depth = 0;
            while i < chars.len() {
                match chars[i] {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
        }
        i += 1;
    }
    false
}
