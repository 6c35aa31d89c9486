//! Progress-callback trait for conversion stage events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to be told
//! when each pipeline stage finishes. The CLI uses it to drive a spinner;
//! library callers can forward events wherever they like.
//!
//! # Example
//!
//! ```rust
//! use txt2pdf::{ConversionConfig, ConversionProgressCallback, EncodingTag};
//! use std::sync::Arc;
//!
//! struct PrintEncoding;
//!
//! impl ConversionProgressCallback for PrintEncoding {
//!     fn on_encoding_detected(&self, encoding: EncodingTag) {
//!         eprintln!("encoding: {encoding}");
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(PrintEncoding) as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::pipeline::detect::EncodingTag;
use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it moves through its stages.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events arrive in order, from a single task, but the
/// trait is `Send + Sync` so the callback can live inside a shared config.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once the input has been found, before it is read.
    fn on_conversion_start(&self, input: &Path) {
        let _ = input;
    }

    /// Called after the byte-order mark has been inspected.
    fn on_encoding_detected(&self, encoding: EncodingTag) {
        let _ = encoding;
    }

    /// Called once the text has been laid out and serialised.
    ///
    /// # Arguments
    /// * `pages` — number of pages in the document
    /// * `lines` — number of laid-out lines after wrapping
    fn on_layout_complete(&self, pages: usize, lines: usize) {
        let _ = (pages, lines);
    }

    /// Called once the output file has been written and closed.
    ///
    /// # Arguments
    /// * `output`        — final path of the document
    /// * `bytes_written` — size of the document in bytes
    fn on_conversion_complete(&self, output: &Path, bytes_written: u64) {
        let _ = (output, bytes_written);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
