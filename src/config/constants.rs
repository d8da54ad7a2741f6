//! Constants for bib-middleware

/// Fields the text codec steps never touch
pub const SKIP_FIELDS: &[&str] = &["url", "file", "doi", "crossref"];

/// Substrings marking a field as a filesystem reference
pub const PATH_FIELD_MARKERS: &[&str] = &["file", "look_in"];

/// Fields holding " and "-separated personal names
pub const NAME_FIELDS: &[&str] = &["author", "editor", "translator"];

/// Fields whose whitespace is normalized on import
pub const TITLE_FIELDS: &[&str] = &["title", "subtitle", "booktitle"];

pub const TAGS_FIELD: &str = "tags";

pub const URL_FIELD: &str = "url";

pub const FILE_FIELD: &str = "file";

/// Entry type eligible for document download
pub const ONLINE_ENTRY_TYPE: &str = "online";

/// Extension of downloaded documents
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Characters of an entry key that cannot appear in a file name
pub const KEY_SEPARATORS: &[char] = &[':', '/'];

/// Suffix appended to the keys of repeated entries
pub const DUPLICATE_SUFFIX: &str = "_dup";

/// Bounded wait for one fetch, in seconds
pub const LOAD_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = concat!("bib-middleware/", env!("CARGO_PKG_VERSION"));

/// Default configuration file name, looked up in the library root
pub const CONFIG_FILE: &str = "bibmw.json";
