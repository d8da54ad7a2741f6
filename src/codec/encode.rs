//! Unicode text to LaTeX markup.

use super::options::{EncodeOptions, UnknownCharPolicy};
use super::symbols;
use super::TextCodec;
use crate::error::{CodecError, CodecResult};

/// Characters escaped with a backslash on output
const ESCAPE_ON_WRITE: &[char] = &['&', '%', '#', '_'];

#[derive(Debug, Clone, Default)]
pub struct LatexEncoder {
    options: EncodeOptions,
}

impl LatexEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, text: &str) -> CodecResult<String> {
        if self.options.enclose_urls && looks_like_url(text) {
            return Ok(format!("\\url{{{}}}", text.trim()));
        }

        let unmatched = unmatched_braces(text);
        let mut out = String::with_capacity(text.len());
        let mut iter = text.char_indices().peekable();

        while let Some((offset, ch)) = iter.next() {
            match ch {
                '$' if self.options.keep_math => {
                    let close = if text[offset + 1..].starts_with('$') { "$$" } else { "$" };
                    let body_start = offset + close.len();
                    // a lone dollar is text, not an unterminated formula
                    let Some(end) = find_unescaped(&text[body_start..], close) else {
                        out.push_str("\\$");
                        continue;
                    };
                    let stop = body_start + end + close.len();
                    out.push_str(&text[offset..stop]);
                    while iter.peek().is_some_and(|(next, _)| *next < stop) {
                        iter.next();
                    }
                }
                // existing commands pass through with the character they escape
                '\\' => {
                    out.push('\\');
                    if let Some((_, next)) = iter.next() {
                        out.push(next);
                    }
                }
                '$' => out.push_str("\\$"),
                '{' | '}' if unmatched.contains(&offset) => {
                    out.push('\\');
                    out.push(ch);
                }
                c if ESCAPE_ON_WRITE.contains(&c) => {
                    out.push('\\');
                    out.push(c);
                }
                // break up sequences that would read back as dashes or quotes
                '-' | '`' | '\'' if iter.peek().is_some_and(|(_, next)| *next == ch) => {
                    out.push(ch);
                    out.push_str("{}");
                }
                '~' => out.push_str("{\\textasciitilde}"),
                c if c.is_ascii() => out.push(c),
                c => self.encode_char(c, offset, &mut out)?,
            }
        }

        Ok(out)
    }

    fn encode_char(&self, ch: char, offset: usize, out: &mut String) -> CodecResult<()> {
        if let Some(ligature) = symbols::ligature(ch) {
            out.push_str(ligature);
        } else if let Some((accent, base)) = symbols::decompose(ch) {
            if symbols::LETTER_ACCENTS.contains(&accent) {
                out.push_str(&format!("{{\\{}{{{}}}}}", accent, base));
            } else {
                out.push_str(&format!("{{\\{}{}}}", accent, base));
            }
        } else if let Some(name) = symbols::symbol_macro(ch) {
            out.push_str(&format!("{{\\{}}}", name));
        } else {
            match self.options.unknown_char_policy {
                UnknownCharPolicy::Keep => out.push(ch),
                UnknownCharPolicy::Fail => return Err(CodecError::Unencodable { ch, offset }),
            }
        }
        Ok(())
    }
}

impl TextCodec for LatexEncoder {
    fn apply(&self, text: &str) -> CodecResult<String> {
        self.encode(text)
    }
}

fn looks_like_url(text: &str) -> bool {
    let text = text.trim();
    (text.starts_with("http://") || text.starts_with("https://")) && !text.contains(char::is_whitespace)
}

/// Byte offsets of braces without a partner. Escaped braces are ignored.
fn unmatched_braces(text: &str) -> Vec<usize> {
    let mut open = Vec::new();
    let mut unmatched = Vec::new();
    let mut iter = text.char_indices();
    while let Some((offset, ch)) = iter.next() {
        match ch {
            '\\' => {
                iter.next();
            }
            '{' => open.push(offset),
            '}' => {
                if open.pop().is_none() {
                    unmatched.push(offset);
                }
            }
            _ => {}
        }
    }
    unmatched.extend(open);
    unmatched
}

fn find_unescaped(text: &str, needle: &str) -> Option<usize> {
    let mut iter = text.char_indices();
    while let Some((index, ch)) = iter.next() {
        if ch == '\\' {
            iter.next();
            continue;
        }
        if text[index..].starts_with(needle) {
            return Some(index);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DecodeOptions, LatexDecoder};

    #[test]
    fn test_accents_and_symbols() {
        let e = LatexEncoder::default();
        assert_eq!(e.encode("école").unwrap(), r"{\'e}cole");
        assert_eq!(e.encode("škoda").unwrap(), r"{\v{s}}koda");
        assert_eq!(e.encode("Straße").unwrap(), r"Stra{\ss}e");
        assert_eq!(e.encode("1–10").unwrap(), "1--10");
    }

    #[test]
    fn test_special_characters_escaped() {
        let e = LatexEncoder::default();
        assert_eq!(e.encode("R&D 50% #1 a_b").unwrap(), r"R\&D 50\% \#1 a\_b");
        assert_eq!(e.encode(r"already \& done").unwrap(), r"already \& done");
    }

    #[test]
    fn test_math_kept() {
        let e = LatexEncoder::default();
        assert_eq!(e.encode("The $x_1$ case").unwrap(), "The $x_1$ case");
        assert_eq!(e.encode("cost $5").unwrap(), r"cost \$5");
        assert_eq!(e.encode("Earn $5 now").unwrap(), r"Earn \$5 now");

        let no_math = LatexEncoder::new(EncodeOptions {
            keep_math: false,
            ..EncodeOptions::default()
        });
        assert_eq!(no_math.encode("cost $5").unwrap(), r"cost \$5");
    }

    #[test]
    fn test_unbalanced_braces_escaped() {
        let e = LatexEncoder::default();
        assert_eq!(e.encode("Left { only").unwrap(), r"Left \{ only");
        assert_eq!(e.encode("a } b {c}").unwrap(), r"a \} b {c}");
        assert_eq!(e.encode(r"kept \{ as is").unwrap(), r"kept \{ as is");
    }

    #[test]
    fn test_literal_ligature_characters() {
        let e = LatexEncoder::default();
        let d = LatexDecoder::new(DecodeOptions::default());

        assert_eq!(e.encode("Part 1 -- Intro").unwrap(), "Part 1 -{}- Intro");
        assert_eq!(e.encode("a ``b'' c~d").unwrap(), r"a `{}`b'{}' c{\textasciitilde}d");
        for text in ["Part 1 -- Intro", "x --- y", "``q''", "c~d", "well-known"] {
            assert_eq!(d.decode(&e.encode(text).unwrap()).unwrap(), text);
        }
    }

    #[test]
    fn test_unknown_char_policy() {
        let keep = LatexEncoder::default();
        assert_eq!(keep.encode("漢字").unwrap(), "漢字");

        let fail = LatexEncoder::new(EncodeOptions {
            unknown_char_policy: UnknownCharPolicy::Fail,
            ..EncodeOptions::default()
        });
        assert_eq!(
            fail.encode("ab漢"),
            Err(CodecError::Unencodable { ch: '漢', offset: 2 })
        );
    }

    #[test]
    fn test_enclose_urls() {
        let e = LatexEncoder::new(EncodeOptions {
            enclose_urls: true,
            ..EncodeOptions::default()
        });
        assert_eq!(e.encode("https://x.org/a_b").unwrap(), r"\url{https://x.org/a_b}");
    }

    #[test]
    fn test_round_trip() {
        let e = LatexEncoder::default();
        let d = LatexDecoder::new(DecodeOptions::default());

        let plain = "A plain title, with commas (and parens)";
        assert_eq!(e.encode(plain).unwrap(), plain);
        assert_eq!(d.decode(&e.encode(plain).unwrap()).unwrap(), plain);
        assert_eq!(e.encode(&d.decode(plain).unwrap()).unwrap(), plain);

        let accented = "Gödel, Escher, Bach — naïve";
        assert_eq!(d.decode(&e.encode(accented).unwrap()).unwrap(), accented);
    }
}
