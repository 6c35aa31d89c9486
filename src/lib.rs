//! # txt2pdf
//!
//! Convert plain-text files into paginated PDF documents.
//!
//! Text files in the wild arrive as UTF-8, UTF-8 with a byte-order mark, or
//! UTF-16 in either byte order, with CRLF, CR or LF line endings. Feeding
//! them straight into a PDF produces garbage: a visible U+FEFF glyph at the
//! top, stray carriage-return boxes at every line end, or mojibake when
//! UTF-16 is read as UTF-8. This crate detects the encoding from the
//! byte-order mark, decodes, normalizes, and only then lays the text out.
//!
//! ## Pipeline Overview
//!
//! ```text
//! TXT
//!  │
//!  ├─ 1. Input      validate path, read bytes, create output directory
//!  ├─ 2. Detect     byte-order mark → utf8 / utf16-le / utf16-be
//!  ├─ 3. Decode     encoding_rs, strict (default) or lenient
//!  ├─ 4. Normalize  strip leading U+FEFF, CRLF / CR → LF
//!  ├─ 5. Render     wrap + paginate with printpdf (spawn_blocking)
//!  └─ 6. Write      temp file → sync → rename over the output path
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use txt2pdf::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let result = convert("notes.txt", "out/notes.pdf", &config).await?;
//!     println!("PDF written to {}", result.output_path.display());
//!     println!("Encoding: {}", result.encoding);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `txt2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! txt2pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    BodyFont, ConversionConfig, ConversionConfigBuilder, DecodePolicy, Margins, PageSize,
};
pub use convert::{convert, convert_bytes, convert_sync, detect_file};
pub use error::Txt2PdfError;
pub use output::{ConversionResult, ConversionStats, RenderedDocument};
pub use pipeline::detect::{detect_encoding, EncodingTag};
pub use pipeline::normalize::normalize;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
