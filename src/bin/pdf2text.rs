//! CLI binary for pdf2text.
//!
//! A thin shim over the library crate that maps CLI flags to `RunConfig`
//! and prints a run summary. Exit code 0 on success, 1 on any fatal error.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2text::{run, BackendKind, ProgressSink, RunConfig, RunProgress};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: a page-count bar plus a log line per finished page.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Extracting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl RunProgress for CliProgress {
    fn on_run_start(&self, total_pages: usize) {
        self.bar.set_length(total_pages as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_pages} page(s)…"))
        ));
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: usize, total: usize, text_len: usize) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            green("✓"),
            page_num,
            total,
            dim(&format!("{text_len:>6} chars")),
        ));
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = if error.chars().count() > 80 {
            let head: String = error.chars().take(79).collect();
            format!("{head}\u{2026}")
        } else {
            error.to_string()
        };
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            red("✗"),
            page_num,
            total,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, total_pages: usize, extracted: usize) {
        let failed = total_pages.saturating_sub(extracted);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} page(s) extracted successfully",
                green("✔"),
                bold(&extracted.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} pages extracted  ({} empty after backend failure)",
                if extracted == 0 { red("✘") } else { cyan("⚠") },
                bold(&extracted.to_string()),
                total_pages,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract every page via a local inference server
  pdf2text document.pdf

  # Use the Tesseract OCR binary instead
  pdf2text --tesseract scan.pdf

  # Reuse previously rasterised page images
  pdf2text --skip-extraction document.pdf

  # Re-run a single page (ordinal as it appears in the PNG file name)
  pdf2text --skip-extraction --page 003 document.pdf

  # Point at a non-default inference server and model
  pdf2text --endpoint http://127.0.0.1:8080 --model qwen2.5-vl-7b document.pdf

OUTPUT LAYOUT:
  report.pdf →
    report/pngs/report-page-001.png …   (pdftoppm, 300 DPI)
    report/texts/report-page-001.txt …  (one text file per page)

  A page whose backend fails still gets a text file (an empty one)
  and the run continues. Re-runs overwrite prior output.

ENVIRONMENT VARIABLES:
  PDF2TEXT_ENDPOINT       Chat-completions server base URL
  PDF2TEXT_MODEL          Model identifier for the inference backend
  PDF2TEXT_SYSTEM_PROMPT  Override the system instruction
  PDF2TEXT_USER_PROMPT    Override the user-message instruction
  PDF2TEXT_DPI            Rasterisation resolution
  PDF2TEXT_LANGUAGES      Tesseract language spec (e.g. rus+eng)

EXTERNAL TOOLS:
  pdftoppm (poppler-utils) for rasterisation; tesseract for --tesseract.
"#;

/// Convert a PDF into per-page text files via a local vision model or Tesseract OCR.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2text",
    version,
    about = "Convert a PDF into per-page text files via a local vision model or Tesseract OCR",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input PDF file.
    input_pdf: PathBuf,

    /// Skip PDF-to-PNG conversion and reuse existing page images.
    #[arg(long)]
    skip_extraction: bool,

    /// Process a single page; the zero-padded ordinal from the image
    /// file name (e.g. 003 selects <stem>-page-003.png).
    #[arg(long, value_name = "NNN")]
    page: Option<String>,

    /// Use the local Tesseract OCR binary instead of the inference server.
    #[arg(long)]
    tesseract: bool,

    /// Chat-completions server base URL (route /v1/chat/completions is appended).
    #[arg(long, env = "PDF2TEXT_ENDPOINT", default_value = pdf2text::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model identifier requested from the inference server.
    #[arg(long, env = "PDF2TEXT_MODEL")]
    model: Option<String>,

    /// Override the system instruction sent to the model.
    #[arg(long, env = "PDF2TEXT_SYSTEM_PROMPT", value_name = "TEXT")]
    system_prompt: Option<String>,

    /// Override the user-message instruction sent alongside the image.
    #[arg(long, env = "PDF2TEXT_USER_PROMPT", value_name = "TEXT")]
    user_prompt: Option<String>,

    /// Rasterisation DPI (72–600).
    #[arg(long, env = "PDF2TEXT_DPI", default_value_t = pdf2text::config::DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// Tesseract language spec (primary+secondary).
    #[arg(long, env = "PDF2TEXT_LANGUAGES", default_value = pdf2text::config::DEFAULT_LANGUAGES)]
    languages: String,

    /// Tesseract OCR engine mode (0 = legacy).
    #[arg(long, default_value_t = pdf2text::config::DEFAULT_ENGINE_MODE)]
    oem: u8,

    /// Print the run summary as JSON instead of the human-readable line.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the progress bar is active;
    // the bar provides all the feedback that matters to the operator.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
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

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = RunConfig::builder()
        .backend(if cli.tesseract {
            BackendKind::Tesseract
        } else {
            BackendKind::Inference
        })
        .dpi(cli.dpi)
        .skip_rasterize(cli.skip_extraction)
        .endpoint(cli.endpoint.as_str())
        .languages(cli.languages.as_str())
        .engine_mode(cli.oem);

    if let Some(ref page) = cli.page {
        builder = builder.page(page.as_str());
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model.as_str());
    }
    if let Some(ref prompt) = cli.system_prompt {
        builder = builder.system_prompt(prompt.as_str());
    }
    if let Some(ref prompt) = cli.user_prompt {
        builder = builder.user_prompt(prompt.as_str());
    }
    if show_progress {
        builder = builder.progress(CliProgress::new() as ProgressSink);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run ──────────────────────────────────────────────────────────────
    let output = run(&cli.input_pdf, &config)
        .await
        .context("Processing failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise run summary")?
        );
    } else if !cli.quiet && !show_progress {
        // The progress callback already printed a summary when active.
        eprintln!(
            "Extracted {}/{} pages in {}ms → {}",
            output.stats.extracted_pages,
            output.stats.total_pages,
            output.stats.total_duration_ms,
            output.texts_dir.display()
        );
        if output.stats.failed_pages > 0 {
            eprintln!("  {} page(s) written empty", output.stats.failed_pages);
        }
    }

    Ok(())
}
