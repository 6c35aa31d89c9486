//! Result types returned by the conversion entry points.

use crate::pipeline::detect::EncodingTag;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Returned by [`crate::convert::convert`] on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Where the document was written.
    pub output_path: PathBuf,
    /// The encoding the input was decoded with.
    pub encoding: EncodingTag,
    pub stats: ConversionStats,
}

/// Returned by [`crate::convert::convert_bytes`]: the document stays in memory.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub pdf: Vec<u8>,
    pub encoding: EncodingTag,
    pub stats: ConversionStats,
}

/// Size and timing figures for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Size of the raw input.
    pub input_bytes: usize,
    /// Characters in the normalized text.
    pub chars: usize,
    /// Laid-out lines after wrapping.
    pub lines: usize,
    pub pages: usize,
    /// Size of the serialised document.
    pub output_bytes: u64,
    pub render_duration_ms: u64,
    pub total_duration_ms: u64,
}
