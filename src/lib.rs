//! # pdf2text
//!
//! Convert PDF documents into per-page text files using a local vision
//! model or Tesseract OCR.
//!
//! ## Why this crate?
//!
//! Scanned documents carry no text layer, and conventional extractors
//! return nothing for them. This crate rasterises each page into a PNG
//! and hands the image to a text recogniser — either a multimodal model
//! served from a local OpenAI-compatible endpoint (LM Studio and friends)
//! or the classic Tesseract binary — then writes one `.txt` file per
//! page next to the source document.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      validate path and %PDF magic
//!  ├─ 2. Layout     create <parent>/<stem>/{pngs,texts}
//!  ├─ 3. Rasterise  pdftoppm → one PNG per page at 300 DPI
//!  ├─ 4. Enumerate  page images in lexicographic (= page) order
//!  ├─ 5. Extract    inference server or tesseract, one page at a time
//!  └─ 6. Write      <stem>-page-NNN.txt per page image
//! ```
//!
//! Pages are processed strictly sequentially. A backend failure costs
//! only that page (an empty text file is written and the run continues);
//! everything before the page loop is fatal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2text::{run, RunConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::default();
//!     let output = run("document.pdf", &config).await?;
//!     eprintln!(
//!         "{}/{} pages extracted into {}",
//!         output.stats.extracted_pages,
//!         output.stats.total_pages,
//!         output.texts_dir.display()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2text` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2text = { version = "0.3", default-features = false }
//! ```
//!
//! ## External tools
//!
//! Rasterisation shells out to `pdftoppm` (poppler-utils). The Tesseract
//! backend shells out to `tesseract`. The inference backend needs a
//! running chat-completions server; point `--endpoint` at it.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod run;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{BackendKind, InferenceBackend, TesseractBackend, TextBackend};
pub use config::{InferenceConfig, RunConfig, RunConfigBuilder, TesseractConfig};
pub use error::{BackendError, Pdf2TextError};
pub use output::{PageRecord, RunOutput, RunStats};
pub use progress::{NoopProgress, ProgressSink, RunProgress};
pub use run::{run, run_sync};
