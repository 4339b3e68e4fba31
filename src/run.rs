//! The run orchestrator: wire every pipeline stage together.
//!
//! The pipeline is a straight line with no branching back and no partial
//! resume: resolve input → create directories → rasterise (or validate
//! prior images) → enumerate pages → extract and write each page strictly
//! one after another. A re-run reprocesses everything and overwrites
//! prior text output.
//!
//! Failure severities follow the two-tier model in [`crate::error`]:
//! anything before the page loop is fatal, while inside the loop a
//! backend failure only costs that page its text — it is logged, an
//! empty file is written, and the loop moves on.

use crate::backend::create_backend;
use crate::config::RunConfig;
use crate::error::Pdf2TextError;
use crate::output::{PageRecord, RunOutput, RunStats};
use crate::pipeline::{input, layout::DocumentLayout, pages, rasterize, write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Convert a PDF into per-page text files.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_pdf` — Path to the source PDF
/// * `config`    — Run configuration
///
/// # Returns
/// `Ok(RunOutput)` on success, even if some pages' backends failed
/// (check `output.stats.failed_pages`; those pages hold empty text files).
///
/// # Errors
/// Returns `Err(Pdf2TextError)` only for fatal errors: missing or invalid
/// input, directory creation failure, rasterisation failure, no page
/// images when rasterisation is skipped, a requested page that does not
/// exist, or a text file that cannot be written.
pub async fn run(
    input_pdf: impl AsRef<Path>,
    config: &RunConfig,
) -> Result<RunOutput, Pdf2TextError> {
    let total_start = Instant::now();
    let input_pdf = input_pdf.as_ref();
    info!("Processing {}", input_pdf.display());

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let pdf_path = input::resolve_pdf(input_pdf)?;

    // ── Step 2: Derive and create the output tree ────────────────────────
    let layout = DocumentLayout::for_pdf(&pdf_path)?;
    layout.ensure_dirs().await?;

    // ── Step 3: Rasterise, or validate prior page images ─────────────────
    let rasterise_start = Instant::now();
    if config.skip_rasterize {
        rasterize::ensure_existing_pages(&layout)?;
        info!("Reusing page images in {}", layout.pngs_dir.display());
    } else {
        rasterize::rasterize(&pdf_path, &layout, config.dpi).await?;
    }
    let rasterise_duration_ms = rasterise_start.elapsed().as_millis() as u64;

    // ── Step 4: Enumerate pages ──────────────────────────────────────────
    let page_images = pages::enumerate_pages(&layout, config.page.as_deref())?;
    let total_pages = page_images.len();
    info!("{} page image(s) selected", total_pages);

    if let Some(ref sink) = config.progress {
        sink.on_run_start(total_pages);
    }

    // ── Step 5: Extract and write, page by page ──────────────────────────
    let backend = create_backend(config);
    let extract_start = Instant::now();
    let mut records = Vec::with_capacity(total_pages);

    for (i, image) in page_images.iter().enumerate() {
        let page_num = i + 1;
        if let Some(ref sink) = config.progress {
            sink.on_page_start(page_num, total_pages);
        }

        let page_start = Instant::now();
        let (text, error) = match backend.extract_text(image).await {
            Ok(text) => (text, None),
            Err(e) => {
                warn!(
                    "{} backend failed on {}: {}",
                    backend.kind(),
                    image.display(),
                    e
                );
                (String::new(), Some(e.to_string()))
            }
        };

        let text_path = write::text_path_for(image, &layout.texts_dir);
        write::write_page_text(&text_path, &text).await?;

        if let Some(ref sink) = config.progress {
            match error {
                None => sink.on_page_complete(page_num, total_pages, text.len()),
                Some(ref e) => sink.on_page_error(page_num, total_pages, e),
            }
        }

        records.push(PageRecord {
            page_num,
            image: image.clone(),
            text_path,
            text_len: text.len(),
            duration_ms: page_start.elapsed().as_millis() as u64,
            error,
        });
    }
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;

    // ── Step 6: Compute stats ────────────────────────────────────────────
    let extracted = records.iter().filter(|r| r.error.is_none()).count();
    let failed = records.len() - extracted;
    let stats = RunStats {
        total_pages,
        extracted_pages: extracted,
        failed_pages: failed,
        rasterise_duration_ms,
        extract_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Run complete: {}/{} pages extracted, {}ms total",
        extracted, total_pages, stats.total_duration_ms
    );

    if let Some(ref sink) = config.progress {
        sink.on_run_complete(total_pages, extracted);
    }

    Ok(RunOutput {
        pages: records,
        stats,
        pngs_dir: layout.pngs_dir,
        texts_dir: layout.texts_dir,
    })
}

/// Synchronous wrapper around [`run`].
///
/// Creates a temporary tokio runtime internally.
pub fn run_sync(
    input_pdf: impl AsRef<Path>,
    config: &RunConfig,
) -> Result<RunOutput, Pdf2TextError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2TextError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(run(input_pdf, config))
}
