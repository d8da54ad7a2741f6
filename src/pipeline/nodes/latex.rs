use async_trait::async_trait;

use super::enclosing::strip_braces;
use crate::codec::TextCodec;
use crate::config::constants::SKIP_FIELDS;
use crate::core::{Block, Entry, Library};
use crate::error::CodecResult;
use crate::pipeline::aggregate::aggregate;
use crate::pipeline::codec_step::transform_fields;
use crate::pipeline::core::Middleware;
use crate::pipeline::keys;

/// LaTeX -> Unicode for every field except urls, files, dois and crossrefs
pub struct LatexReader {
    decoder: Box<dyn TextCodec>,
}

impl LatexReader {
    pub fn new(decoder: impl TextCodec + 'static) -> Self {
        Self { decoder: Box::new(decoder) }
    }
}

#[async_trait]
impl Middleware for LatexReader {
    fn metadata_key(&self) -> &'static str {
        keys::LATEX_DECODING
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        let results = transform_fields(keys::LATEX_DECODING, &mut entry, SKIP_FIELDS, self.decoder.as_ref());
        aggregate(entry, results)
    }
}

/// Unicode -> LaTeX for every field except urls, files, dois and crossrefs.
/// A value enclosed in one brace pair is encoded inside the pair.
pub struct LatexWriter {
    encoder: Box<dyn TextCodec>,
}

impl LatexWriter {
    pub fn new(encoder: impl TextCodec + 'static) -> Self {
        Self { encoder: Box::new(KeepEnclosing(encoder)) }
    }
}

#[async_trait]
impl Middleware for LatexWriter {
    fn metadata_key(&self) -> &'static str {
        keys::LATEX_ENCODING
    }

    async fn transform_entry(&self, mut entry: Entry, _library: &Library) -> Block {
        let results = transform_fields(keys::LATEX_ENCODING, &mut entry, SKIP_FIELDS, self.encoder.as_ref());
        aggregate(entry, results)
    }
}

/// Applies the inner codec inside a single enclosing brace pair
struct KeepEnclosing<C>(C);

impl<C: TextCodec> TextCodec for KeepEnclosing<C> {
    fn apply(&self, text: &str) -> CodecResult<String> {
        match strip_braces(text) {
            Some(inner) => self.0.apply(inner).map(|encoded| format!("{{{}}}", encoded)),
            None => self.0.apply(text),
        }
    }
}
