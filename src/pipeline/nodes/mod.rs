//! Built-in steps

pub mod duplicates;
pub mod enclosing;
pub mod latex;
pub mod names;
pub mod online;
pub mod paths;
pub mod strings;
pub mod tags;
pub mod title;

pub use duplicates::DuplicateKeys;
pub use enclosing::{AddEnclosing, RemoveEnclosing};
pub use latex::{LatexReader, LatexWriter};
pub use names::{MergeCoAuthors, MergeNameParts, RelaxedSplitNameParts, SeparateCoAuthors};
pub use online::OnlineDownloader;
pub use paths::{ParsePaths, WritePaths};
pub use strings::ResolveStringReferences;
pub use tags::{ParseTags, WriteTags};
pub use title::TitleStrip;
