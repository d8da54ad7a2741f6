//! LaTeX markup to Unicode text.

use indexmap::IndexMap;
use tracing::debug;

use super::options::{DecodeOptions, DecodeRuleSpec, MathMode, default_decode_rules};
use super::symbols;
use super::TextCodec;
use crate::error::{CodecError, CodecResult, Result};

const PUNCTUATION_ACCENTS: &[char] = &['\'', '`', '^', '"', '~', '=', '.'];

#[derive(Clone, Copy)]
enum Stop {
    End,
    /// Closing brace of a group opened at this offset
    Brace(usize),
}

/// Cursor over the characters of one string, reporting byte offsets
/// relative to the outermost text being decoded.
struct Reader<'a> {
    text: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    base: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str, base: usize) -> Self {
        Self {
            text,
            chars: text.char_indices().collect(),
            pos: 0,
            base,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn local_offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.text.len())
    }

    fn offset(&self) -> usize {
        self.base + self.local_offset()
    }

    fn rest(&self) -> &'a str {
        &self.text[self.local_offset()..]
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.chars.len());
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn take_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(ch) = self.peek().filter(char::is_ascii_alphabetic) {
            name.push(ch);
            self.pos += 1;
        }
        name
    }

    /// Raw source of a group whose opening brace was already consumed.
    /// Consumes the closing brace.
    fn raw_group(&mut self, open: usize) -> CodecResult<String> {
        let mut depth = 0usize;
        let mut raw = String::new();
        while let Some(ch) = self.bump() {
            match ch {
                '\\' => {
                    raw.push(ch);
                    if let Some(next) = self.bump() {
                        raw.push(next);
                    }
                }
                '{' => {
                    depth += 1;
                    raw.push(ch);
                }
                '}' if depth == 0 => return Ok(raw),
                '}' => {
                    depth -= 1;
                    raw.push(ch);
                }
                _ => raw.push(ch),
            }
        }
        Err(CodecError::UnclosedGroup(open))
    }

    /// Byte index within `rest()` of the first unescaped `close`
    fn find_close(&self, close: &str) -> Option<usize> {
        let rest = self.rest();
        let mut iter = rest.char_indices();
        while let Some((index, ch)) = iter.next() {
            if ch == '\\' && !close.starts_with('\\') {
                iter.next();
                continue;
            }
            if rest[index..].starts_with(close) {
                return Some(index);
            }
        }
        None
    }
}

/// Decoder from LaTeX markup to Unicode, configured once and reused for every field
#[derive(Debug, Clone)]
pub struct LatexDecoder {
    options: DecodeOptions,
    /// Rules keyed by macro name
    rules: IndexMap<String, DecodeRuleSpec>,
}

impl LatexDecoder {
    /// Decoder with the default rule set
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            rules: by_macro(default_decode_rules()),
        }
    }

    /// Decoder with the default rules extended by `extra`. A rule with the
    /// same name as a default rule replaces it.
    pub fn with_rules(
        options: DecodeOptions,
        extra: &IndexMap<String, DecodeRuleSpec>,
    ) -> Result<Self> {
        let mut all = default_decode_rules();
        for (name, rule) in extra {
            rule.validate(name)?;
            all.insert(name.clone(), rule.clone());
        }
        debug!("Building LaTeX decoder: {:?}", all.keys().collect::<Vec<_>>());
        Ok(Self {
            options,
            rules: by_macro(all),
        })
    }

    pub fn decode(&self, text: &str) -> CodecResult<String> {
        self.decode_at(text, 0)
    }

    fn decode_at(&self, text: &str, base: usize) -> CodecResult<String> {
        let mut reader = Reader::new(text, base);
        self.sequence(&mut reader, Stop::End)
    }

    fn sequence(&self, r: &mut Reader, stop: Stop) -> CodecResult<String> {
        let mut out = String::new();
        while let Some(ch) = r.peek() {
            let offset = r.offset();
            match ch {
                '\\' if r.starts_with("\\(") || r.starts_with("\\[") => self.math(r, &mut out)?,
                '\\' => self.escape(r, &mut out)?,
                '{' => {
                    r.bump();
                    let inner = self.sequence(r, Stop::Brace(offset))?;
                    self.push_group(&mut out, inner);
                }
                '}' => {
                    return match stop {
                        Stop::Brace(_) => {
                            r.bump();
                            Ok(out)
                        }
                        Stop::End => Err(CodecError::UnexpectedClose(offset)),
                    };
                }
                '$' => self.math(r, &mut out)?,
                '-' if r.starts_with("---") => {
                    r.advance(3);
                    out.push('—');
                }
                '-' if r.starts_with("--") => {
                    r.advance(2);
                    out.push('–');
                }
                '`' if r.starts_with("``") => {
                    r.advance(2);
                    out.push('“');
                }
                '\'' if r.starts_with("''") => {
                    r.advance(2);
                    out.push('”');
                }
                '~' => {
                    r.bump();
                    out.push('\u{a0}');
                }
                _ => {
                    r.bump();
                    out.push(ch);
                }
            }
        }

        match stop {
            Stop::End => Ok(out),
            Stop::Brace(open) => Err(CodecError::UnclosedGroup(open)),
        }
    }

    fn push_group(&self, out: &mut String, inner: String) {
        if self.options.keep_braced_groups && inner.chars().count() >= 2 {
            out.push('{');
            out.push_str(&inner);
            out.push('}');
        } else {
            out.push_str(&inner);
        }
    }

    fn escape(&self, r: &mut Reader, out: &mut String) -> CodecResult<()> {
        let offset = r.offset();
        r.bump();
        let Some(next) = r.peek() else {
            return Err(CodecError::DanglingEscape(offset));
        };

        if next.is_ascii_alphabetic() {
            let name = r.take_name();
            let mut letters = name.chars();
            if let (Some(accent), None) = (letters.next(), letters.next()) {
                if symbols::LETTER_ACCENTS.contains(&accent) {
                    r.skip_spaces();
                    return self.accent(r, accent, offset, out);
                }
            }
            if let Some(text) = symbols::symbol(&name) {
                out.push_str(text);
                if r.starts_with("{}") {
                    r.advance(2);
                }
                return Ok(());
            }
            if let Some(rule) = self.rules.get(&name) {
                r.skip_spaces();
                let open = r.offset();
                if r.peek() != Some('{') {
                    return Err(CodecError::MissingArgument {
                        command: name,
                        offset,
                    });
                }
                r.bump();
                let argument = if rule.verbatim {
                    r.raw_group(open)?
                } else {
                    self.sequence(r, Stop::Brace(open))?
                };
                out.push_str(&rule.apply(&argument));
                return Ok(());
            }
            debug!("Keeping unknown macro \\{}", name);
            out.push('\\');
            out.push_str(&name);
            return Ok(());
        }

        r.bump();
        match next {
            c if PUNCTUATION_ACCENTS.contains(&c) => self.accent(r, c, offset, out)?,
            // kept groups and literal braces must stay distinguishable
            '{' | '}' if self.options.keep_braced_groups => {
                out.push('\\');
                out.push(next);
            }
            c if symbols::ESCAPED.contains(&c) => out.push(c),
            '\\' => out.push('\n'),
            ' ' | ',' => out.push(' '),
            '-' | '/' | '@' => {}
            c => out.push(c),
        }
        Ok(())
    }

    fn accent(&self, r: &mut Reader, accent: char, offset: usize, out: &mut String) -> CodecResult<()> {
        let missing = || CodecError::MissingArgument {
            command: accent.to_string(),
            offset,
        };

        let argument = match r.peek() {
            Some('{') => {
                let open = r.offset();
                r.bump();
                let inner_base = r.offset();
                let raw = r.raw_group(open)?;
                match raw.trim() {
                    "" => return Err(missing()),
                    "\\i" => "i".to_string(),
                    "\\j" => "j".to_string(),
                    other => self.decode_at(other, inner_base)?,
                }
            }
            Some('\\') => {
                r.bump();
                let name = r.take_name();
                match name.as_str() {
                    "i" => "i".to_string(),
                    "j" => "j".to_string(),
                    other => symbols::symbol(other).ok_or_else(missing)?.to_string(),
                }
            }
            Some('}') | None => return Err(missing()),
            Some(ch) => {
                r.bump();
                ch.to_string()
            }
        };

        let mut chars = argument.chars();
        let Some(base) = chars.next() else {
            return Err(missing());
        };
        match symbols::compose(accent, base) {
            Some(composed) => out.push(composed),
            None => {
                out.push(base);
                if let Some(mark) = symbols::combining(accent) {
                    out.push(mark);
                }
            }
        }
        out.push_str(chars.as_str());
        Ok(())
    }

    fn math(&self, r: &mut Reader, out: &mut String) -> CodecResult<()> {
        let offset = r.offset();
        let (open, close) = if r.starts_with("$$") {
            ("$$", "$$")
        } else if r.starts_with("$") {
            ("$", "$")
        } else if r.starts_with("\\(") {
            ("\\(", "\\)")
        } else {
            ("\\[", "\\]")
        };
        r.advance(open.len());

        let body_base = r.offset();
        let Some(end) = r.find_close(close) else {
            return Err(CodecError::UnterminatedMath(offset));
        };
        let body = &r.rest()[..end];
        let body_chars = body.chars().count();

        match self.options.math_mode {
            MathMode::Verbatim => {
                out.push_str(open);
                out.push_str(body);
                out.push_str(close);
            }
            MathMode::Remove => {}
            MathMode::Text => out.push_str(&self.decode_at(body, body_base)?),
            MathMode::WithDelimiters => {
                out.push_str(open);
                out.push_str(&self.decode_at(body, body_base)?);
                out.push_str(close);
            }
        }

        r.advance(body_chars + close.len());
        Ok(())
    }
}

impl TextCodec for LatexDecoder {
    fn apply(&self, text: &str) -> CodecResult<String> {
        self.decode(text)
    }
}

fn by_macro(rules: IndexMap<String, DecodeRuleSpec>) -> IndexMap<String, DecodeRuleSpec> {
    rules
        .into_values()
        .map(|rule| (rule.macro_name.clone(), rule))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> LatexDecoder {
        LatexDecoder::new(DecodeOptions::default())
    }

    #[test]
    fn test_accents() {
        let d = decoder();
        assert_eq!(d.decode(r#"Schr\"odinger"#).unwrap(), "Schrödinger");
        assert_eq!(d.decode(r"{\'e}cole").unwrap(), "école");
        assert_eq!(d.decode(r"\v{s}koda").unwrap(), "škoda");
        assert_eq!(d.decode(r"Erd\H{o}s").unwrap(), "Erdős");
        assert_eq!(d.decode(r"\'{\i}").unwrap(), "í");
        assert_eq!(d.decode(r"\c c").unwrap(), "ç");
    }

    #[test]
    fn test_symbols_and_ligatures() {
        let d = decoder();
        assert_eq!(d.decode(r"Stra{\ss}e").unwrap(), "Straße");
        assert_eq!(d.decode(r"R\&D 50\%").unwrap(), "R&D 50%");
        assert_eq!(d.decode("pages 1--10 --- ``quoted''").unwrap(), "pages 1–10 — “quoted”");
        assert_eq!(d.decode("A~B").unwrap(), "A\u{a0}B");
    }

    #[test]
    fn test_style_and_url_rules() {
        let d = decoder();
        assert_eq!(d.decode(r"\emph{Very} \textbf{bold}").unwrap(), "Very bold");
        assert_eq!(d.decode(r"\url{http://x.org/a_b%20c}").unwrap(), "http://x.org/a_b%20c");
    }

    #[test]
    fn test_braced_groups() {
        let d = decoder();
        assert_eq!(d.decode("{DNA} sequencing").unwrap(), "DNA sequencing");

        let keep = LatexDecoder::new(DecodeOptions {
            keep_braced_groups: true,
            ..DecodeOptions::default()
        });
        assert_eq!(keep.decode(r#"{DNA} and {\"o}"#).unwrap(), "{DNA} and ö");
        assert_eq!(keep.decode(r"Left \{ only").unwrap(), r"Left \{ only");
        assert_eq!(d.decode(r"Left \{ only").unwrap(), "Left { only");
    }

    #[test]
    fn test_math_modes() {
        let text = r"Energy $E=mc^2$";
        let mode = |math_mode| {
            LatexDecoder::new(DecodeOptions {
                keep_braced_groups: false,
                math_mode,
            })
            .decode(text)
            .unwrap()
        };
        assert_eq!(mode(MathMode::Text), "Energy E=mc^2");
        assert_eq!(mode(MathMode::WithDelimiters), "Energy $E=mc^2$");
        assert_eq!(mode(MathMode::Verbatim), "Energy $E=mc^2$");
        assert_eq!(mode(MathMode::Remove), "Energy ");
    }

    #[test]
    fn test_errors_report_offsets() {
        let d = decoder();
        assert_eq!(d.decode("a {b"), Err(CodecError::UnclosedGroup(2)));
        assert_eq!(d.decode("a}b"), Err(CodecError::UnexpectedClose(1)));
        assert_eq!(d.decode("cost $5"), Err(CodecError::UnterminatedMath(5)));
        assert_eq!(d.decode("end\\"), Err(CodecError::DanglingEscape(3)));
        assert!(matches!(
            d.decode(r"\'"),
            Err(CodecError::MissingArgument { offset: 0, .. })
        ));
    }

    #[test]
    fn test_plain_ascii_is_identity() {
        let d = decoder();
        let text = "A Study of Things: Part 2 (revised), vol. 3";
        assert_eq!(d.decode(text).unwrap(), text);
    }

    #[test]
    fn test_unknown_macro_kept() {
        assert_eq!(decoder().decode(r"\foo bar").unwrap(), r"\foo bar");
    }

    #[test]
    fn test_custom_rule() {
        let mut extra = IndexMap::new();
        extra.insert(
            "acronym".to_string(),
            DecodeRuleSpec::new("acro", "[%s]", false),
        );
        let d = LatexDecoder::with_rules(DecodeOptions::default(), &extra).unwrap();
        assert_eq!(d.decode(r"\acro{NASA}").unwrap(), "[NASA]");

        extra.insert("bad".to_string(), DecodeRuleSpec::new("x1", "%s", false));
        assert!(LatexDecoder::with_rules(DecodeOptions::default(), &extra).is_err());
    }
}
