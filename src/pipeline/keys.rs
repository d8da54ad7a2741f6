/// Metadata keys identifying each step

pub const DUPLICATE_KEYS: &str = "duplicate_keys";
pub const RESOLVE_STRING_REFERENCES: &str = "resolve_string_references";
pub const REMOVE_ENCLOSING: &str = "remove_enclosing";
pub const LATEX_DECODING: &str = "latex_decoding";
pub const PARSE_PATHS: &str = "parse_paths";
pub const PARSE_TAGS: &str = "parse_tags";
pub const SEPARATE_COAUTHORS: &str = "separate_coauthors";
pub const RELAXED_SPLIT_NAME_PARTS: &str = "relaxed_split_name_parts";
pub const TITLE_STRIP: &str = "title_strip";

pub const MERGE_NAME_PARTS: &str = "merge_name_parts";
pub const MERGE_COAUTHORS: &str = "merge_coauthors";
pub const LATEX_ENCODING: &str = "latex_encoding";
pub const WRITE_TAGS: &str = "write_tags";
pub const WRITE_PATHS: &str = "write_paths";
pub const ADD_ENCLOSING: &str = "add_enclosing";

pub const ONLINE_DOWNLOADER: &str = "online_downloader";

/// Read stack order. String references are substituted before markup is
/// decoded, and markup is decoded before tags and names are parsed.
pub const READ_STACK: &[&str] = &[
    DUPLICATE_KEYS,
    RESOLVE_STRING_REFERENCES,
    REMOVE_ENCLOSING,
    LATEX_DECODING,
    PARSE_PATHS,
    PARSE_TAGS,
    SEPARATE_COAUTHORS,
    RELAXED_SPLIT_NAME_PARTS,
    TITLE_STRIP,
];

/// Write stack order. Enclosure comes last so encoding never double-wraps.
pub const WRITE_STACK: &[&str] = &[
    MERGE_NAME_PARTS,
    MERGE_COAUTHORS,
    LATEX_ENCODING,
    WRITE_TAGS,
    WRITE_PATHS,
    ADD_ENCLOSING,
];
