//! Conversion entry points.
//!
//! [`convert`] is the whole pipeline, file to file. [`convert_bytes`] runs the
//! same stages in memory for callers that already hold the text, and
//! [`detect_file`] stops after encoding detection.

use crate::config::ConversionConfig;
use crate::error::Txt2PdfError;
use crate::output::{ConversionResult, ConversionStats, RenderedDocument};
use crate::pipeline::detect::{detect_encoding, EncodingTag};
use crate::pipeline::{decode, input, normalize, render, write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert the text file at `input_path` into a PDF at `output_path`.
///
/// This is the primary entry point for the library. Missing parent
/// directories of `output_path` are created; an existing file there is
/// replaced.
///
/// # Errors
/// - [`Txt2PdfError::InputNotFound`] if the input does not exist, before any
///   file-system write
/// - [`Txt2PdfError::OutputIsInput`] if `output_path` names the input file,
///   before any file-system write
/// - [`Txt2PdfError::OutputDirFailed`] if the output directory cannot be created
/// - [`Txt2PdfError::DecodeFailed`] if the bytes are malformed under a strict
///   [`crate::DecodePolicy`]
/// - [`Txt2PdfError::OutputWriteFailed`] if the document cannot be written
pub async fn convert(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionResult, Txt2PdfError> {
    let total_start = Instant::now();
    let output_path = output_path.as_ref();
    info!(
        "Starting conversion: {} → {}",
        input_path.as_ref().display(),
        output_path.display()
    );

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let input_path = input::resolve_input(input_path.as_ref())?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(&input_path);
    }

    input::reject_output_is_input(&input_path, output_path)?;

    // ── Step 2: Prepare output directory ─────────────────────────────────
    input::ensure_parent_dir(output_path).await?;

    // ── Step 3: Read ─────────────────────────────────────────────────────
    let bytes = input::read_input(&input_path).await?;

    // ── Steps 4–6: Detect, decode, normalize ─────────────────────────────
    let (encoding, text) = prepare_text(&bytes, config)?;
    let chars = text.chars().count();

    // ── Step 7: Remove stale output (best-effort) ────────────────────────
    let stale = write::remove_stale_output(output_path).await;

    // ── Step 8: Render ───────────────────────────────────────────────────
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| input::default_title(&input_path));
    let render_start = Instant::now();
    let rendered = render::render(text, title, config).await?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    if let Some(ref cb) = config.progress_callback {
        cb.on_layout_complete(rendered.pages, rendered.lines);
    }

    // ── Step 9: Write session ────────────────────────────────────────────
    let output_bytes = write::write_document(output_path, &rendered.pdf, stale).await?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(output_path, output_bytes);
    }

    let stats = ConversionStats {
        input_bytes: bytes.len(),
        chars,
        lines: rendered.lines,
        pages: rendered.pages,
        output_bytes,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} pages, {} encoding, {}ms total",
        stats.pages, encoding, stats.total_duration_ms
    );

    Ok(ConversionResult {
        output_path: output_path.to_path_buf(),
        encoding,
        stats,
    })
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionResult, Txt2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Txt2PdfError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input_path, output_path, config))
}

/// Convert raw text-file bytes to PDF bytes without touching the file system.
///
/// # Example
/// ```rust,no_run
/// use txt2pdf::{convert_bytes, ConversionConfig, EncodingTag};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let doc = convert_bytes(b"hello\r\nworld", &ConversionConfig::default()).await?;
/// assert_eq!(doc.encoding, EncodingTag::Utf8);
/// std::fs::write("hello.pdf", &doc.pdf)?;
/// # Ok(())
/// # }
/// ```
pub async fn convert_bytes(
    bytes: &[u8],
    config: &ConversionConfig,
) -> Result<RenderedDocument, Txt2PdfError> {
    let total_start = Instant::now();
    let (encoding, text) = prepare_text(bytes, config)?;
    let chars = text.chars().count();

    let title = config
        .title
        .clone()
        .unwrap_or_else(|| "Document".to_string());
    let render_start = Instant::now();
    let rendered = render::render(text, title, config).await?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    if let Some(ref cb) = config.progress_callback {
        cb.on_layout_complete(rendered.pages, rendered.lines);
    }

    let stats = ConversionStats {
        input_bytes: bytes.len(),
        chars,
        lines: rendered.lines,
        pages: rendered.pages,
        output_bytes: rendered.pdf.len() as u64,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    Ok(RenderedDocument {
        pdf: rendered.pdf,
        encoding,
        stats,
    })
}

/// Report the encoding of the file at `path` without converting it.
pub async fn detect_file(path: impl AsRef<Path>) -> Result<EncodingTag, Txt2PdfError> {
    let path = input::resolve_input(path.as_ref())?;
    let bytes = input::read_input(&path).await?;
    Ok(detect_encoding(&bytes))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Detect, decode and normalize `bytes`.
fn prepare_text(
    bytes: &[u8],
    config: &ConversionConfig,
) -> Result<(EncodingTag, String), Txt2PdfError> {
    let encoding = detect_encoding(bytes);
    info!("Detected encoding: {}", encoding);
    if let Some(ref cb) = config.progress_callback {
        cb.on_encoding_detected(encoding);
    }

    let decoded = decode::decode(bytes, encoding, config.decode_policy)?;
    let text = normalize::normalize(&decoded);
    debug!(
        "Normalized text: {} → {} bytes",
        decoded.len(),
        text.len()
    );
    Ok((encoding, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodePolicy;

    #[tokio::test]
    async fn utf16_be_bytes_convert_in_memory() {
        let mut bytes = vec![0xFE, 0xFF];
        bytes.extend("hi\r\nthere".encode_utf16().flat_map(|u| u.to_be_bytes()));

        let doc = convert_bytes(&bytes, &ConversionConfig::default())
            .await
            .unwrap();
        assert_eq!(doc.encoding, EncodingTag::Utf16Be);
        assert!(doc.pdf.starts_with(b"%PDF"));
        assert_eq!(doc.stats.chars, "hi\nthere".chars().count());
        assert_eq!(doc.stats.lines, 2);
        assert_eq!(doc.stats.pages, 1);
    }

    #[tokio::test]
    async fn strict_policy_fails_fast() {
        let err = convert_bytes(b"\xC3(", &ConversionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Txt2PdfError::DecodeFailed { offset: 0, .. }));
    }

    #[tokio::test]
    async fn lenient_policy_renders_anyway() {
        let config = ConversionConfig::builder()
            .decode_policy(DecodePolicy::Lenient)
            .build()
            .unwrap();
        let doc = convert_bytes(b"\xC3(", &config).await.unwrap();
        assert!(doc.pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn prepare_text_strips_marker_and_carriage_returns() {
        let (enc, text) =
            prepare_text(b"\xEF\xBB\xBFa\r\nb\rc", &ConversionConfig::default()).unwrap();
        assert_eq!(enc, EncodingTag::Utf8);
        assert_eq!(text, "a\nb\nc");
    }
}
