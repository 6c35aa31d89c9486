//! CLI binary for txt2pdf.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use txt2pdf::{
    convert, detect_file, BodyFont, ConversionConfig, ConversionProgressCallback, DecodePolicy,
    EncodingTag, PageSize, ProgressCallback,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner on stderr whose message follows the
/// pipeline stages.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.set_message("Reading input…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, input: &Path) {
        self.bar.set_message(format!("Reading {}…", input.display()));
    }

    fn on_encoding_detected(&self, encoding: EncodingTag) {
        self.bar
            .set_message(format!("Decoding as {encoding}, laying out pages…"));
    }

    fn on_layout_complete(&self, pages: usize, lines: usize) {
        self.bar
            .set_message(format!("Writing {pages} pages ({lines} lines)…"));
    }

    fn on_conversion_complete(&self, _output: &Path, bytes_written: u64) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {}",
            green("✔"),
            dim(&format!("{bytes_written} bytes written"))
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert next to the input (notes.txt → notes.pdf)
  txt2pdf notes.txt

  # Convert to a specific path; missing directories are created
  txt2pdf notes.txt -o out/notes.pdf

  # Monospaced A4 output
  txt2pdf --font courier --page-size a4 robots.txt

  # Only report the detected encoding
  txt2pdf --detect-only notes.txt

  # Accept malformed input, substituting U+FFFD
  txt2pdf --lenient legacy.txt

ENCODING DETECTION:
  Only the byte-order mark is inspected:
    EF BB BF  → utf8
    FF FE     → utf16-le
    FE FF     → utf16-be
    (none)    → utf8
  Files without a mark that are not UTF-8 fail to decode unless --lenient
  is given.

ENVIRONMENT VARIABLES:
  RUST_LOG                Override the log filter (e.g. RUST_LOG=txt2pdf=debug)
  TXT2PDF_*               Every flag can also be set via its TXT2PDF_ variable
"#;

/// Convert plain-text files to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "txt2pdf",
    version,
    about = "Convert plain-text files to PDF, detecting UTF-8 / UTF-16 from the byte-order mark",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input text file.
    input: PathBuf,

    /// Output PDF path. Default: the input path with a .pdf extension.
    #[arg(short, long, env = "TXT2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Page size.
    #[arg(long, env = "TXT2PDF_PAGE_SIZE", value_enum, default_value = "letter")]
    page_size: PageSizeArg,

    /// Body font.
    #[arg(long, env = "TXT2PDF_FONT", value_enum, default_value = "times")]
    font: FontArg,

    /// Font size in points (4–72).
    #[arg(long, env = "TXT2PDF_FONT_SIZE", default_value_t = 11.0)]
    font_size: f32,

    /// Extra space between lines in points.
    #[arg(long, env = "TXT2PDF_LINE_GAP", default_value_t = 2.0)]
    line_gap: f32,

    /// Margin on all four sides in points.
    #[arg(long, env = "TXT2PDF_MARGIN", default_value_t = 50.0)]
    margin: f32,

    /// Document title metadata. Default: the input file name without extension.
    #[arg(long, env = "TXT2PDF_TITLE")]
    title: Option<String>,

    /// Replace malformed byte sequences with U+FFFD instead of failing.
    #[arg(long, env = "TXT2PDF_LENIENT")]
    lenient: bool,

    /// Print the detected encoding only, no conversion.
    #[arg(long)]
    detect_only: bool,

    /// Output the conversion result as JSON.
    #[arg(long, env = "TXT2PDF_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "TXT2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TXT2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the result.
    #[arg(short, long, env = "TXT2PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum PageSizeArg {
    Letter,
    A4,
    Legal,
}

impl From<PageSizeArg> for PageSize {
    fn from(v: PageSizeArg) -> Self {
        match v {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Legal => PageSize::Legal,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FontArg {
    Times,
    Helvetica,
    Courier,
}

impl From<FontArg> for BodyFont {
    fn from(v: FontArg) -> Self {
        match v {
            FontArg::Times => BodyFont::TimesRoman,
            FontArg::Helvetica => BodyFont::Helvetica,
            FontArg::Courier => BodyFont::Courier,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; it
    // provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.detect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Detect-only mode ─────────────────────────────────────────────────
    if cli.detect_only {
        let encoding = detect_file(&cli.input)
            .await
            .context("Failed to detect encoding")?;
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "input": cli.input,
                    "encoding": encoding,
                })
            );
        } else {
            println!("{encoding}");
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress = show_progress.then(CliProgressCallback::new);
    let config = build_config(
        &cli,
        progress
            .clone()
            .map(|cb| cb as Arc<dyn ConversionProgressCallback>),
    )?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    // ── Run conversion ───────────────────────────────────────────────────
    let result = convert(&cli.input, &output, &config).await;
    if let Some(ref cb) = progress {
        cb.abandon();
    }
    let result = result.context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialise result")?;
        println!("{json}");
    } else {
        println!("PDF written to: {}", result.output_path.display());
        println!("Detected encoding: {}", result.encoding);
        if !cli.quiet {
            eprintln!(
                "   {} pages  /  {} lines  —  {}ms total",
                dim(&result.stats.pages.to_string()),
                dim(&result.stats.lines.to_string()),
                result.stats.total_duration_ms,
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .page_size(cli.page_size.clone().into())
        .font(cli.font.clone().into())
        .font_size(cli.font_size)
        .line_gap(cli.line_gap)
        .margin(cli.margin)
        .decode_policy(if cli.lenient {
            DecodePolicy::Lenient
        } else {
            DecodePolicy::Strict
        });

    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
