//! Document rendering: normalized text → paginated PDF bytes via `printpdf`.
//!
//! printpdf 0.8 uses a data-oriented API: each page is a `PdfPage` holding a
//! `Vec<Op>`, and the whole document is serialised in memory by
//! `PdfDocument::save()`. Layout is therefore ours to do: lines are wrapped
//! by measured glyph width to the usable width and flowed top-to-bottom,
//! spilling onto new pages.
//!
//! ## Why spawn_blocking?
//!
//! Building and serialising the document is CPU-bound and scales with the
//! input size. [`render`] moves it to Tokio's blocking pool so the runtime's
//! worker threads never stall on a large file.

use crate::config::{BodyFont, ConversionConfig};
use crate::error::Txt2PdfError;
use crate::pipeline::widths;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
};
use tracing::{debug, info};

/// Spaces a tab expands to.
const TAB_WIDTH: usize = 4;

/// A serialised document plus layout counts.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub pdf: Vec<u8>,
    pub pages: usize,
    pub lines: usize,
}

/// Page geometry derived from a [`ConversionConfig`], all in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub page_height_pt: f32,
    pub margin_top: f32,
    pub margin_left: f32,
    pub font: BodyFont,
    pub font_size: f32,
    /// Distance from the top margin to the first baseline.
    pub first_baseline: f32,
    pub line_height: f32,
    /// Room between the left and right margins.
    pub usable_width: f32,
    pub lines_per_page: usize,
}

impl PageLayout {
    pub fn from_config(config: &ConversionConfig) -> Self {
        let (page_width_mm, page_height_mm) = config.page_size.dimensions_mm();
        let metrics = config.font.metrics();
        let line_height = metrics.line_height(config.font_size, config.line_gap);
        let lines_per_page = ((config.usable_height_pt() / line_height) as usize).max(1);

        Self {
            page_width_mm,
            page_height_mm,
            page_height_pt: config.page_size.height_pt(),
            margin_top: config.margins.top,
            margin_left: config.margins.left,
            font: config.font,
            font_size: config.font_size,
            first_baseline: metrics.ascent * config.font_size,
            line_height,
            usable_width: config.usable_width_pt(),
            lines_per_page,
        }
    }

    /// Baseline y coordinate (from the page bottom) of the `row`-th line.
    fn baseline_y(&self, row: usize) -> f32 {
        self.page_height_pt - self.margin_top - self.first_baseline - row as f32 * self.line_height
    }

    /// Advance of `c` at the body font size, in points.
    pub fn char_width(&self, c: char) -> f32 {
        f32::from(widths::advance(self.font, c)) * self.font_size / 1000.0
    }

    /// Width of `text` at the body font size, in points.
    pub fn text_width(&self, text: &str) -> f32 {
        widths::text_width(self.font, self.font_size, text)
    }
}

/// Render `text` on Tokio's blocking pool.
pub async fn render(
    text: String,
    title: String,
    config: &ConversionConfig,
) -> Result<RenderOutput, Txt2PdfError> {
    let layout = PageLayout::from_config(config);
    tokio::task::spawn_blocking(move || render_document(&text, &title, &layout))
        .await
        .map_err(|e| Txt2PdfError::Internal(format!("Render task panicked: {}", e)))
}

/// Lay out `text` and serialise it as a PDF.
pub fn render_document(text: &str, title: &str, layout: &PageLayout) -> RenderOutput {
    let lines = wrap_text(text, layout.usable_width, |c| layout.char_width(c));
    let line_count = lines.len();

    info!(
        "Laying out {} lines, {} per page, {:.1}pt per line",
        line_count, layout.lines_per_page, layout.usable_width
    );

    let mut pages: Vec<PdfPage> = lines
        .chunks(layout.lines_per_page)
        .map(|chunk| {
            let mut ops: Vec<Op> = Vec::new();
            for (row, line) in chunk.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(layout.margin_left),
                        y: Pt(layout.baseline_y(row)),
                    },
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(layout.font_size),
                    font: builtin_font(layout.font),
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(line.clone())],
                    font: builtin_font(layout.font),
                });
                ops.push(Op::EndTextSection);
            }
            PdfPage::new(Mm(layout.page_width_mm), Mm(layout.page_height_mm), ops)
        })
        .collect();

    if pages.is_empty() {
        pages.push(PdfPage::new(
            Mm(layout.page_width_mm),
            Mm(layout.page_height_mm),
            Vec::new(),
        ));
    }
    let page_count = pages.len();

    let mut doc = PdfDocument::new(title);
    doc.with_pages(pages);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let pdf = doc.save(&PdfSaveOptions::default(), &mut warnings);
    debug!(
        "Serialised {} pages → {} bytes ({} warnings)",
        page_count,
        pdf.len(),
        warnings.len()
    );

    RenderOutput {
        pdf,
        pages: page_count,
        lines: line_count,
    }
}

fn builtin_font(font: BodyFont) -> BuiltinFont {
    match font {
        BodyFont::TimesRoman => BuiltinFont::TimesRoman,
        BodyFont::Helvetica => BuiltinFont::Helvetica,
        BodyFont::Courier => BuiltinFont::Courier,
    }
}

// ── Line wrapping ────────────────────────────────────────────────────────

/// Split `text` on line feeds and wrap each line to `max_width`.
///
/// `width_of` gives the advance of one char. Lines break at the last space
/// that fits; a run with no space is broken before the first char that
/// overflows. Every line holds at least one char, so a single glyph wider
/// than `max_width` still makes progress. Leading indentation is kept.
pub fn wrap_text(text: &str, max_width: f32, width_of: impl Fn(char) -> f32) -> Vec<String> {
    let mut result = Vec::new();
    for line in text.split('\n') {
        let expanded = line.replace('\t', &" ".repeat(TAB_WIDTH));
        wrap_line(&expanded, max_width, &width_of, &mut result);
    }
    result
}

fn wrap_line(line: &str, max_width: f32, width_of: &impl Fn(char) -> f32, out: &mut Vec<String>) {
    let mut rest = line;
    loop {
        let Some(limit) = overflow_index(rest, max_width, width_of) else {
            out.push(rest.to_string());
            return;
        };

        // The char at `limit` would overflow; a space there is a free break.
        let cut = if rest[limit..].starts_with(' ') {
            limit
        } else {
            match rest[..limit].rfind(' ') {
                Some(i) if !rest[..i].trim().is_empty() => i,
                _ => limit,
            }
        };

        out.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start_matches(' ');
        if rest.is_empty() {
            return;
        }
    }
}

/// Byte index of the first char that no longer fits in `max_width`.
/// The first char always fits.
fn overflow_index(line: &str, max_width: f32, width_of: &impl Fn(char) -> f32) -> Option<usize> {
    let mut width = 0.0;
    for (i, c) in line.char_indices() {
        width += width_of(c);
        if i > 0 && width > max_width {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSize;

    /// Every char one unit wide.
    fn unit(_: char) -> f32 {
        1.0
    }

    fn layout_for(font: BodyFont) -> PageLayout {
        PageLayout::from_config(&ConversionConfig::builder().font(font).build().unwrap())
    }

    #[test]
    fn short_lines_pass_through() {
        assert_eq!(wrap_text("a\nb\n\nc", 80.0, unit), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 80.0, unit), vec![""]);
    }

    #[test]
    fn wraps_at_spaces() {
        assert_eq!(
            wrap_text("the quick brown fox", 10.0, unit),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn hard_breaks_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4.0, unit), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // 'í' is two bytes in UTF-8; slicing by bytes would panic here.
        assert_eq!(wrap_text("ííííí", 2.0, unit), vec!["íí", "íí", "í"]);
    }

    #[test]
    fn keeps_indentation_and_expands_tabs() {
        assert_eq!(wrap_text("\tx", 80.0, unit), vec!["    x"]);
        assert_eq!(wrap_text("  indented", 80.0, unit), vec!["  indented"]);
    }

    #[test]
    fn wide_glyph_lines_stay_inside_the_margins() {
        let samples = [
            "0123456789".repeat(30),
            "ABCDEFGHIJKLMNOPQRSTUVWXYZ".repeat(12),
            "WWW MMM ".repeat(40),
            "ÆÆÆÆ ÑÑÑÑ ".repeat(30),
        ];
        for font in [BodyFont::TimesRoman, BodyFont::Helvetica, BodyFont::Courier] {
            let layout = layout_for(font);
            let right_edge = layout.page_width_mm * 72.0 / 25.4 - 50.0;
            for text in &samples {
                let lines = wrap_text(text, layout.usable_width, |c| layout.char_width(c));
                assert!(lines.len() > 1, "[{font:?}] expected wrapping");
                for line in &lines {
                    let width = layout.text_width(line);
                    assert!(
                        width <= layout.usable_width + 1e-3,
                        "[{font:?}] {width}pt > {}pt: {line}",
                        layout.usable_width
                    );
                    assert!(layout.margin_left + width <= right_edge + 1e-3);
                }
            }
        }
    }

    #[test]
    fn narrow_glyphs_fill_more_of_the_line() {
        let layout = layout_for(BodyFont::TimesRoman);
        let narrow = wrap_text(&"i".repeat(400), layout.usable_width, |c| layout.char_width(c));
        let wide = wrap_text(&"W".repeat(400), layout.usable_width, |c| layout.char_width(c));
        assert!(narrow[0].chars().count() > wide[0].chars().count() * 3);
    }

    #[test]
    fn glyph_wider_than_the_line_still_progresses() {
        assert_eq!(wrap_text("ab", 0.5, unit), vec!["a", "b"]);
    }

    #[test]
    fn layout_defaults_fit_letter() {
        let layout = PageLayout::from_config(&ConversionConfig::default());
        assert!((layout.usable_width - 512.0).abs() < 0.1);
        assert!(layout.lines_per_page > 40);
        assert!((layout.page_height_pt - 792.0).abs() < 0.1);
        assert!(layout.baseline_y(0) < layout.page_height_pt - layout.margin_top);
    }

    #[test]
    fn bigger_pages_hold_more_lines() {
        let letter = PageLayout::from_config(&ConversionConfig::default());
        let legal = PageLayout::from_config(
            &ConversionConfig::builder()
                .page_size(PageSize::Legal)
                .build()
                .unwrap(),
        );
        assert!(legal.lines_per_page > letter.lines_per_page);
    }

    #[test]
    fn renders_a_pdf() {
        let layout = PageLayout::from_config(&ConversionConfig::default());
        let out = render_document("Línea uno\nLínea dos", "test", &layout);
        assert!(out.pdf.starts_with(b"%PDF"));
        assert_eq!(out.pages, 1);
        assert_eq!(out.lines, 2);
    }

    #[test]
    fn empty_text_renders_one_page() {
        let layout = PageLayout::from_config(&ConversionConfig::default());
        let out = render_document("", "empty", &layout);
        assert!(out.pdf.starts_with(b"%PDF"));
        assert_eq!(out.pages, 1);
    }

    #[test]
    fn long_text_flows_onto_more_pages() {
        let layout = PageLayout::from_config(&ConversionConfig::default());
        let text = (0..layout.lines_per_page * 2 + 1)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let out = render_document(&text, "long", &layout);
        assert_eq!(out.pages, 3);
    }
}
