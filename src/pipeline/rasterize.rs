//! Rasteriser adapter: PDF pages → PNG files via pdftoppm.
//!
//! The external process writes `<stem>-page-<NNN>.png` files into the
//! layout's pngs directory, one per page, with zero-padded ordinals so
//! lexicographic file order equals page order. Any rasteriser failure is
//! fatal for the whole run; there is nothing sensible to extract text
//! from without page images.

use crate::error::Pdf2TextError;
use crate::pipeline::layout::DocumentLayout;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Rasterise every page of the PDF into the layout's pngs directory.
pub async fn rasterize(
    pdf_path: &Path,
    layout: &DocumentLayout,
    dpi: u32,
) -> Result<(), Pdf2TextError> {
    let prefix = layout.page_prefix();
    debug!(
        "pdftoppm -png -r {} {} {}",
        dpi,
        pdf_path.display(),
        prefix.display()
    );

    let output = Command::new("pdftoppm")
        .arg("-png")
        .args(["-r", &dpi.to_string()])
        .arg(pdf_path)
        .arg(&prefix)
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            info!("Rasterised {} at {} DPI", pdf_path.display(), dpi);
            Ok(())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(Pdf2TextError::RasterisationFailed {
                detail: format!("pdftoppm exited with {}: {}", output.status, stderr.trim()),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Pdf2TextError::RasterisationFailed {
                detail: "pdftoppm not found (install poppler-utils)".to_string(),
            })
        }
        Err(e) => Err(Pdf2TextError::RasterisationFailed {
            detail: e.to_string(),
        }),
    }
}

/// Validate that a prior run left at least one page image behind.
///
/// Used when rasterisation is skipped: the run is pointless — and
/// therefore fatal — with an empty pngs directory.
pub fn ensure_existing_pages(layout: &DocumentLayout) -> Result<(), Pdf2TextError> {
    let has_png = std::fs::read_dir(&layout.pngs_dir)
        .map(|entries| {
            entries.flatten().any(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            })
        })
        .unwrap_or(false);

    if has_png {
        Ok(())
    } else {
        Err(Pdf2TextError::NoPageImages {
            dir: layout.pngs_dir.clone(),
        })
    }
}
