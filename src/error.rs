//! Error types for the txt2pdf library.
//!
//! Every failure that reaches the caller is fatal and is returned as
//! [`Txt2PdfError`] from the top-level `convert*` functions. The variants are
//! grouped by the pipeline stage that raises them:
//!
//! * **Input** — the source file is missing or unreadable, or the output
//!   path points back at it. Raised before any file-system write happens.
//! * **File system** — the output directory could not be created.
//! * **Decode** — the bytes are malformed under the detected encoding.
//! * **Render / write** — the document could not be written to its path.
//!
//! Removing a stale output file is best-effort and never produces an error by
//! itself; see [`crate::pipeline::write::StaleRemoval`].

use crate::pipeline::detect::EncodingTag;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the txt2pdf library.
#[derive(Debug, Error)]
pub enum Txt2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input exists but reading it failed (e.g. it is a directory).
    #[error("Failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output path names the input file; writing would destroy the source.
    #[error("Output path '{path}' is the input file\nChoose a different output path with -o.")]
    OutputIsInput { path: PathBuf },

    // ── File system errors ────────────────────────────────────────────────
    /// Could not create the directory that will hold the output document.
    #[error("Failed to create output directory '{dir}': {source}")]
    OutputDirFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Decode errors ─────────────────────────────────────────────────────
    /// The input bytes are not well-formed under the detected encoding.
    #[error(
        "Input is not valid {encoding}: malformed byte sequence at offset {offset}\n\
         Re-run with --lenient to substitute U+FFFD for invalid sequences."
    )]
    DecodeFailed { encoding: EncodingTag, offset: usize },

    // ── Render / write errors ─────────────────────────────────────────────
    /// The output stream failed while writing or finalising the document.
    #[error("Failed to write output document '{path}': {source}{}", stale_note(.stale_removal))]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        /// Why an earlier best-effort removal of the previous output failed,
        /// if it did. Usually the same lock that broke the write.
        stale_removal: Option<String>,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn stale_note(stale_removal: &Option<String>) -> String {
    match stale_removal {
        Some(reason) => format!("\nThe previous output could not be removed either: {reason}"),
        None => String::new(),
    }
}
