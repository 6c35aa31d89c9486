//! Configuration types for text-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Input and output paths are *not* part
//! of the config: they are explicit arguments of [`crate::convert::convert`],
//! and only the CLI supplies defaults for them.

use crate::error::Txt2PdfError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a text-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use txt2pdf::{BodyFont, ConversionConfig, PageSize};
///
/// let config = ConversionConfig::builder()
///     .page_size(PageSize::A4)
///     .font(BodyFont::Courier)
///     .font_size(10.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Physical page size. Default: [`PageSize::Letter`].
    pub page_size: PageSize,

    /// Page margins in points. Default: 50pt on every side.
    pub margins: Margins,

    /// Body typeface. Default: [`BodyFont::TimesRoman`].
    pub font: BodyFont,

    /// Body font size in points. Range: 4–72. Default: 11.
    pub font_size: f32,

    /// Extra space between consecutive lines, in points. Range: 0–72. Default: 2.
    pub line_gap: f32,

    /// What to do with byte sequences that are malformed under the detected
    /// encoding. Default: [`DecodePolicy::Strict`].
    pub decode_policy: DecodePolicy,

    /// Title written to the PDF metadata. If None, the input file stem is used.
    pub title: Option<String>,

    /// Optional stage-event callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margins: Margins::default(),
            font: BodyFont::default(),
            font_size: 11.0,
            line_gap: 2.0,
            decode_policy: DecodePolicy::default(),
            title: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("page_size", &self.page_size)
            .field("margins", &self.margins)
            .field("font", &self.font)
            .field("font_size", &self.font_size)
            .field("line_gap", &self.line_gap)
            .field("decode_policy", &self.decode_policy)
            .field("title", &self.title)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Width available for text between the left and right margins, in points.
    pub fn usable_width_pt(&self) -> f32 {
        self.page_size.width_pt() - self.margins.left - self.margins.right
    }

    /// Height available for text between the top and bottom margins, in points.
    pub fn usable_height_pt(&self) -> f32 {
        self.page_size.height_pt() - self.margins.top - self.margins.bottom
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    /// Same margin on all four sides.
    pub fn margin(mut self, pt: f32) -> Self {
        self.config.margins = Margins::uniform(pt);
        self
    }

    pub fn font(mut self, font: BodyFont) -> Self {
        self.config.font = font;
        self
    }

    pub fn font_size(mut self, pt: f32) -> Self {
        self.config.font_size = pt.clamp(4.0, 72.0);
        self
    }

    pub fn line_gap(mut self, pt: f32) -> Self {
        self.config.line_gap = pt.clamp(0.0, 72.0);
        self
    }

    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.config.decode_policy = policy;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Attach a progress callback. See [`crate::progress`].
    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Txt2PdfError> {
        let c = &self.config;
        let m = &c.margins;
        if [m.top, m.bottom, m.left, m.right]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(Txt2PdfError::InvalidConfig(format!(
                "Margins must be finite and ≥ 0, got {m:?}"
            )));
        }
        if !c.font_size.is_finite() || !c.line_gap.is_finite() {
            return Err(Txt2PdfError::InvalidConfig(
                "Font size and line gap must be finite".into(),
            ));
        }
        if c.usable_width_pt() < c.font_size {
            return Err(Txt2PdfError::InvalidConfig(format!(
                "Left/right margins leave {:.1}pt of a {:.1}pt wide page; need at least {:.1}pt",
                c.usable_width_pt(),
                c.page_size.width_pt(),
                c.font_size
            )));
        }
        let line_height = c.font.metrics().line_height(c.font_size, c.line_gap);
        if c.usable_height_pt() < line_height {
            return Err(Txt2PdfError::InvalidConfig(format!(
                "Top/bottom margins leave {:.1}pt of a {:.1}pt tall page; one line needs {:.1}pt",
                c.usable_height_pt(),
                c.page_size.height_pt(),
                line_height
            )));
        }
        Ok(self.config)
    }
}

// ── Enums & value types ──────────────────────────────────────────────────

/// How malformed byte sequences are handled during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Abort with [`Txt2PdfError::DecodeFailed`] at the first malformed sequence. (default)
    #[default]
    Strict,
    /// Replace malformed sequences with U+FFFD and log a warning.
    Lenient,
}

/// Supported page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// US Letter, 8.5 × 11 in. (default)
    #[default]
    Letter,
    /// ISO A4, 210 × 297 mm.
    A4,
    /// US Legal, 8.5 × 14 in.
    Legal,
}

impl PageSize {
    /// `(width, height)` in millimetres.
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (215.9, 279.4),
            PageSize::A4 => (210.0, 297.0),
            PageSize::Legal => (215.9, 355.6),
        }
    }

    pub fn width_pt(self) -> f32 {
        mm_to_pt(self.dimensions_mm().0)
    }

    pub fn height_pt(self) -> f32 {
        mm_to_pt(self.dimensions_mm().1)
    }
}

fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    pub fn uniform(pt: f32) -> Self {
        Self {
            top: pt,
            bottom: pt,
            left: pt,
            right: pt,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(50.0)
    }
}

/// The base-14 PDF fonts offered for body text.
///
/// Builtin fonts need no font file and are available in every PDF viewer.
/// Their encoding covers Latin-1; code points outside it are not drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyFont {
    /// Times-Roman. (default)
    #[default]
    TimesRoman,
    Helvetica,
    Courier,
}

impl BodyFont {
    /// Vertical metrics from the Adobe AFM files. Horizontal advances live in
    /// [`crate::pipeline::widths`].
    pub fn metrics(self) -> FontMetrics {
        match self {
            BodyFont::TimesRoman => FontMetrics {
                ascent: 0.683,
                descent: -0.217,
            },
            BodyFont::Helvetica => FontMetrics {
                ascent: 0.718,
                descent: -0.207,
            },
            BodyFont::Courier => FontMetrics {
                ascent: 0.629,
                descent: -0.157,
            },
        }
    }
}

/// Font metrics in units of the font size (1.0 = one em).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl FontMetrics {
    /// Baseline-to-baseline distance for `font_size` plus `line_gap`, in points.
    pub fn line_height(&self, font_size: f32, line_gap: f32) -> f32 {
        font_size * (self.ascent - self.descent) + line_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_document_layout() {
        let c = ConversionConfig::default();
        assert_eq!(c.margins, Margins::uniform(50.0));
        assert_eq!(c.font, BodyFont::TimesRoman);
        assert_eq!(c.font_size, 11.0);
        assert!(c.line_gap > 0.0);
        assert_eq!(c.decode_policy, DecodePolicy::Strict);
        assert_eq!(c.page_size, PageSize::Letter);
    }

    #[test]
    fn letter_is_612_by_792_points() {
        assert!((PageSize::Letter.width_pt() - 612.0).abs() < 0.1);
        assert!((PageSize::Letter.height_pt() - 792.0).abs() < 0.1);
    }

    #[test]
    fn builder_clamps_font_size() {
        let c = ConversionConfig::builder().font_size(500.0).build().unwrap();
        assert_eq!(c.font_size, 72.0);
        let c = ConversionConfig::builder().font_size(0.0).build().unwrap();
        assert_eq!(c.font_size, 4.0);
    }

    #[test]
    fn builder_rejects_margins_without_room() {
        let err = ConversionConfig::builder().margin(400.0).build().unwrap_err();
        assert!(matches!(err, Txt2PdfError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_negative_margin() {
        let mut margins = Margins::default();
        margins.left = -1.0;
        let err = ConversionConfig::builder().margins(margins).build().unwrap_err();
        assert!(err.to_string().contains("Margins"));
    }

    #[test]
    fn usable_area_subtracts_margins() {
        let c = ConversionConfig::default();
        assert!((c.usable_width_pt() - 512.0).abs() < 0.1);
        assert!((c.usable_height_pt() - 692.0).abs() < 0.1);
    }

    #[test]
    fn debug_hides_callback() {
        let c = ConversionConfig::builder()
            .progress_callback(std::sync::Arc::new(crate::progress::NoopProgressCallback))
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("<dyn ConversionProgressCallback>"));
    }
}
