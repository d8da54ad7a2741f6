//! Lookup tables shared by the decoder and the encoder.

/// Accent command, base letter, precomposed character
pub const ACCENTS: &[(char, char, char)] = &[
    ('\'', 'a', 'á'), ('\'', 'c', 'ć'), ('\'', 'e', 'é'), ('\'', 'g', 'ǵ'), ('\'', 'i', 'í'),
    ('\'', 'k', 'ḱ'), ('\'', 'l', 'ĺ'), ('\'', 'm', 'ḿ'), ('\'', 'n', 'ń'), ('\'', 'o', 'ó'),
    ('\'', 'p', 'ṕ'), ('\'', 'r', 'ŕ'), ('\'', 's', 'ś'), ('\'', 'u', 'ú'), ('\'', 'w', 'ẃ'),
    ('\'', 'y', 'ý'), ('\'', 'z', 'ź'), ('\'', 'A', 'Á'), ('\'', 'C', 'Ć'), ('\'', 'E', 'É'),
    ('\'', 'G', 'Ǵ'), ('\'', 'I', 'Í'), ('\'', 'K', 'Ḱ'), ('\'', 'L', 'Ĺ'), ('\'', 'M', 'Ḿ'),
    ('\'', 'N', 'Ń'), ('\'', 'O', 'Ó'), ('\'', 'P', 'Ṕ'), ('\'', 'R', 'Ŕ'), ('\'', 'S', 'Ś'),
    ('\'', 'U', 'Ú'), ('\'', 'W', 'Ẃ'), ('\'', 'Y', 'Ý'), ('\'', 'Z', 'Ź'), ('`', 'a', 'à'),
    ('`', 'e', 'è'), ('`', 'i', 'ì'), ('`', 'n', 'ǹ'), ('`', 'o', 'ò'), ('`', 'u', 'ù'),
    ('`', 'w', 'ẁ'), ('`', 'y', 'ỳ'), ('`', 'A', 'À'), ('`', 'E', 'È'), ('`', 'I', 'Ì'),
    ('`', 'N', 'Ǹ'), ('`', 'O', 'Ò'), ('`', 'U', 'Ù'), ('`', 'W', 'Ẁ'), ('`', 'Y', 'Ỳ'),
    ('^', 'a', 'â'), ('^', 'c', 'ĉ'), ('^', 'e', 'ê'), ('^', 'g', 'ĝ'), ('^', 'h', 'ĥ'),
    ('^', 'i', 'î'), ('^', 'j', 'ĵ'), ('^', 'o', 'ô'), ('^', 's', 'ŝ'), ('^', 'u', 'û'),
    ('^', 'w', 'ŵ'), ('^', 'y', 'ŷ'), ('^', 'z', 'ẑ'), ('^', 'A', 'Â'), ('^', 'C', 'Ĉ'),
    ('^', 'E', 'Ê'), ('^', 'G', 'Ĝ'), ('^', 'H', 'Ĥ'), ('^', 'I', 'Î'), ('^', 'J', 'Ĵ'),
    ('^', 'O', 'Ô'), ('^', 'S', 'Ŝ'), ('^', 'U', 'Û'), ('^', 'W', 'Ŵ'), ('^', 'Y', 'Ŷ'),
    ('^', 'Z', 'Ẑ'), ('"', 'a', 'ä'), ('"', 'e', 'ë'), ('"', 'h', 'ḧ'), ('"', 'i', 'ï'),
    ('"', 'o', 'ö'), ('"', 't', 'ẗ'), ('"', 'u', 'ü'), ('"', 'w', 'ẅ'), ('"', 'x', 'ẍ'),
    ('"', 'y', 'ÿ'), ('"', 'A', 'Ä'), ('"', 'E', 'Ë'), ('"', 'H', 'Ḧ'), ('"', 'I', 'Ï'),
    ('"', 'O', 'Ö'), ('"', 'U', 'Ü'), ('"', 'W', 'Ẅ'), ('"', 'X', 'Ẍ'), ('"', 'Y', 'Ÿ'),
    ('~', 'a', 'ã'), ('~', 'e', 'ẽ'), ('~', 'i', 'ĩ'), ('~', 'n', 'ñ'), ('~', 'o', 'õ'),
    ('~', 'u', 'ũ'), ('~', 'v', 'ṽ'), ('~', 'y', 'ỹ'), ('~', 'A', 'Ã'), ('~', 'E', 'Ẽ'),
    ('~', 'I', 'Ĩ'), ('~', 'N', 'Ñ'), ('~', 'O', 'Õ'), ('~', 'U', 'Ũ'), ('~', 'V', 'Ṽ'),
    ('~', 'Y', 'Ỹ'), ('=', 'a', 'ā'), ('=', 'e', 'ē'), ('=', 'g', 'ḡ'), ('=', 'i', 'ī'),
    ('=', 'o', 'ō'), ('=', 'u', 'ū'), ('=', 'y', 'ȳ'), ('=', 'A', 'Ā'), ('=', 'E', 'Ē'),
    ('=', 'G', 'Ḡ'), ('=', 'I', 'Ī'), ('=', 'O', 'Ō'), ('=', 'U', 'Ū'), ('=', 'Y', 'Ȳ'),
    ('.', 'a', 'ȧ'), ('.', 'b', 'ḃ'), ('.', 'c', 'ċ'), ('.', 'd', 'ḋ'), ('.', 'e', 'ė'),
    ('.', 'f', 'ḟ'), ('.', 'g', 'ġ'), ('.', 'h', 'ḣ'), ('.', 'm', 'ṁ'), ('.', 'n', 'ṅ'),
    ('.', 'o', 'ȯ'), ('.', 'p', 'ṗ'), ('.', 'r', 'ṙ'), ('.', 's', 'ṡ'), ('.', 't', 'ṫ'),
    ('.', 'w', 'ẇ'), ('.', 'x', 'ẋ'), ('.', 'y', 'ẏ'), ('.', 'z', 'ż'), ('.', 'A', 'Ȧ'),
    ('.', 'B', 'Ḃ'), ('.', 'C', 'Ċ'), ('.', 'D', 'Ḋ'), ('.', 'E', 'Ė'), ('.', 'F', 'Ḟ'),
    ('.', 'G', 'Ġ'), ('.', 'H', 'Ḣ'), ('.', 'I', 'İ'), ('.', 'M', 'Ṁ'), ('.', 'N', 'Ṅ'),
    ('.', 'O', 'Ȯ'), ('.', 'P', 'Ṗ'), ('.', 'R', 'Ṙ'), ('.', 'S', 'Ṡ'), ('.', 'T', 'Ṫ'),
    ('.', 'W', 'Ẇ'), ('.', 'X', 'Ẋ'), ('.', 'Y', 'Ẏ'), ('.', 'Z', 'Ż'), ('u', 'a', 'ă'),
    ('u', 'e', 'ĕ'), ('u', 'g', 'ğ'), ('u', 'i', 'ĭ'), ('u', 'o', 'ŏ'), ('u', 'u', 'ŭ'),
    ('u', 'A', 'Ă'), ('u', 'E', 'Ĕ'), ('u', 'G', 'Ğ'), ('u', 'I', 'Ĭ'), ('u', 'O', 'Ŏ'),
    ('u', 'U', 'Ŭ'), ('v', 'a', 'ǎ'), ('v', 'c', 'č'), ('v', 'd', 'ď'), ('v', 'e', 'ě'),
    ('v', 'g', 'ǧ'), ('v', 'h', 'ȟ'), ('v', 'i', 'ǐ'), ('v', 'j', 'ǰ'), ('v', 'k', 'ǩ'),
    ('v', 'l', 'ľ'), ('v', 'n', 'ň'), ('v', 'o', 'ǒ'), ('v', 'r', 'ř'), ('v', 's', 'š'),
    ('v', 't', 'ť'), ('v', 'u', 'ǔ'), ('v', 'z', 'ž'), ('v', 'A', 'Ǎ'), ('v', 'C', 'Č'),
    ('v', 'D', 'Ď'), ('v', 'E', 'Ě'), ('v', 'G', 'Ǧ'), ('v', 'H', 'Ȟ'), ('v', 'I', 'Ǐ'),
    ('v', 'K', 'Ǩ'), ('v', 'L', 'Ľ'), ('v', 'N', 'Ň'), ('v', 'O', 'Ǒ'), ('v', 'R', 'Ř'),
    ('v', 'S', 'Š'), ('v', 'T', 'Ť'), ('v', 'U', 'Ǔ'), ('v', 'Z', 'Ž'), ('H', 'o', 'ő'),
    ('H', 'u', 'ű'), ('H', 'O', 'Ő'), ('H', 'U', 'Ű'), ('c', 'c', 'ç'), ('c', 'd', 'ḑ'),
    ('c', 'e', 'ȩ'), ('c', 'g', 'ģ'), ('c', 'h', 'ḩ'), ('c', 'k', 'ķ'), ('c', 'l', 'ļ'),
    ('c', 'n', 'ņ'), ('c', 'r', 'ŗ'), ('c', 's', 'ş'), ('c', 't', 'ţ'), ('c', 'C', 'Ç'),
    ('c', 'D', 'Ḑ'), ('c', 'E', 'Ȩ'), ('c', 'G', 'Ģ'), ('c', 'H', 'Ḩ'), ('c', 'K', 'Ķ'),
    ('c', 'L', 'Ļ'), ('c', 'N', 'Ņ'), ('c', 'R', 'Ŗ'), ('c', 'S', 'Ş'), ('c', 'T', 'Ţ'),
    ('r', 'a', 'å'), ('r', 'u', 'ů'), ('r', 'w', 'ẘ'), ('r', 'y', 'ẙ'), ('r', 'A', 'Å'),
    ('r', 'U', 'Ů'), ('k', 'a', 'ą'), ('k', 'e', 'ę'), ('k', 'i', 'į'), ('k', 'o', 'ǫ'),
    ('k', 'u', 'ų'), ('k', 'A', 'Ą'), ('k', 'E', 'Ę'), ('k', 'I', 'Į'), ('k', 'O', 'Ǫ'),
    ('k', 'U', 'Ų'), ('d', 'a', 'ạ'), ('d', 'b', 'ḅ'), ('d', 'd', 'ḍ'), ('d', 'e', 'ẹ'),
    ('d', 'h', 'ḥ'), ('d', 'i', 'ị'), ('d', 'k', 'ḳ'), ('d', 'l', 'ḷ'), ('d', 'm', 'ṃ'),
    ('d', 'n', 'ṇ'), ('d', 'o', 'ọ'), ('d', 'r', 'ṛ'), ('d', 's', 'ṣ'), ('d', 't', 'ṭ'),
    ('d', 'u', 'ụ'), ('d', 'v', 'ṿ'), ('d', 'w', 'ẉ'), ('d', 'y', 'ỵ'), ('d', 'z', 'ẓ'),
    ('d', 'A', 'Ạ'), ('d', 'B', 'Ḅ'), ('d', 'D', 'Ḍ'), ('d', 'E', 'Ẹ'), ('d', 'H', 'Ḥ'),
    ('d', 'I', 'Ị'), ('d', 'K', 'Ḳ'), ('d', 'L', 'Ḷ'), ('d', 'M', 'Ṃ'), ('d', 'N', 'Ṇ'),
    ('d', 'O', 'Ọ'), ('d', 'R', 'Ṛ'), ('d', 'S', 'Ṣ'), ('d', 'T', 'Ṭ'), ('d', 'U', 'Ụ'),
    ('d', 'V', 'Ṿ'), ('d', 'W', 'Ẉ'), ('d', 'Y', 'Ỵ'), ('d', 'Z', 'Ẓ'),
];

/// Accent command to Unicode combining mark, used when no precomposed form exists
pub const COMBINING: &[(char, char)] = &[
    ('\'', '\u{301}'), ('`', '\u{300}'), ('^', '\u{302}'), ('"', '\u{308}'), ('~', '\u{303}'),
    ('=', '\u{304}'), ('.', '\u{307}'), ('u', '\u{306}'), ('v', '\u{30C}'), ('H', '\u{30B}'),
    ('c', '\u{327}'), ('r', '\u{30A}'), ('k', '\u{328}'), ('d', '\u{323}'), ('b', '\u{331}'),
];

/// Accent commands spelled as a single letter (`\v{s}`), as opposed to punctuation (`\'e`)
pub const LETTER_ACCENTS: &[char] = &['u', 'v', 'H', 'c', 'r', 'k', 'd', 'b'];

/// Argument-less control words
pub const SYMBOLS: &[(&str, &str)] = &[
    ("ss", "ß"), ("SS", "SS"), ("o", "ø"), ("O", "Ø"), ("ae", "æ"), ("AE", "Æ"),
    ("oe", "œ"), ("OE", "Œ"), ("aa", "å"), ("AA", "Å"), ("l", "ł"), ("L", "Ł"),
    ("i", "ı"), ("j", "ȷ"), ("dh", "ð"), ("DH", "Ð"), ("th", "þ"), ("TH", "Þ"),
    ("ng", "ŋ"), ("NG", "Ŋ"),
    ("textendash", "–"), ("textemdash", "—"), ("textquoteleft", "‘"),
    ("textquoteright", "’"), ("textquotedblleft", "“"), ("textquotedblright", "”"),
    ("guillemotleft", "«"), ("guillemotright", "»"), ("S", "§"), ("P", "¶"),
    ("dag", "†"), ("ddag", "‡"), ("copyright", "©"), ("textregistered", "®"),
    ("texttrademark", "™"), ("pounds", "£"), ("euro", "€"), ("textdegree", "°"),
    ("ldots", "…"), ("dots", "…"), ("textellipsis", "…"), ("LaTeX", "LaTeX"),
    ("TeX", "TeX"), ("textbackslash", "\\"), ("textasciitilde", "~"),
    ("textunderscore", "_"), ("quad", " "), ("qquad", "  "),
];

/// Escaped ASCII punctuation: `\&` and friends
pub const ESCAPED: &[char] = &['&', '%', '$', '#', '_', '{', '}'];

/// Non-ASCII punctuation written as ASCII ligatures
pub const LIGATURES: &[(char, &str)] = &[
    ('—', "---"), ('–', "--"), ('“', "``"), ('”', "''"), ('\u{a0}', "~"),
];

pub fn compose(accent: char, base: char) -> Option<char> {
    ACCENTS
        .iter()
        .find(|(a, b, _)| *a == accent && *b == base)
        .map(|(_, _, composed)| *composed)
}

pub fn decompose(composed: char) -> Option<(char, char)> {
    ACCENTS
        .iter()
        .find(|(_, _, c)| *c == composed)
        .map(|(accent, base, _)| (*accent, *base))
}

pub fn combining(accent: char) -> Option<char> {
    COMBINING
        .iter()
        .find(|(a, _)| *a == accent)
        .map(|(_, mark)| *mark)
}

pub fn symbol(name: &str) -> Option<&'static str> {
    SYMBOLS
        .iter()
        .find(|(macro_name, _)| *macro_name == name)
        .map(|(_, text)| *text)
}

/// Reverse lookup for single-character symbols
pub fn symbol_macro(ch: char) -> Option<&'static str> {
    let mut buf = [0u8; 4];
    let needle: &str = ch.encode_utf8(&mut buf);
    SYMBOLS
        .iter()
        .find(|(_, text)| *text == needle)
        .map(|(macro_name, _)| *macro_name)
}

pub fn ligature(ch: char) -> Option<&'static str> {
    LIGATURES
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, text)| *text)
}
