//! LaTeX <-> Unicode conversion used by the text codec steps.

pub mod decode;
pub mod encode;
pub mod options;
pub mod symbols;

pub use decode::LatexDecoder;
pub use encode::LatexEncoder;
pub use options::{
    DecodeOptions, DecodeRuleSpec, EncodeOptions, MathMode, UnknownCharPolicy,
    default_decode_rules,
};

use crate::error::CodecResult;

/// A configured conversion applied to one piece of field text
pub trait TextCodec: Send + Sync {
    fn apply(&self, text: &str) -> CodecResult<String>;
}
