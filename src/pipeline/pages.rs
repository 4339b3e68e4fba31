//! Page enumerator: deterministic ordering over rasterised page images.
//!
//! pdftoppm zero-pads page ordinals, so sorting file names
//! lexicographically yields page order without parsing the ordinal out of
//! the name. With an explicit `--page`, the expected file name is
//! constructed from the operator's string verbatim and must exist.

use crate::error::Pdf2TextError;
use crate::pipeline::layout::DocumentLayout;
use std::path::PathBuf;
use tracing::debug;

/// List the page images to process, in page order.
///
/// Without a filter: every `*.png` in the pngs directory, sorted by file
/// name. With a filter: exactly the one image named by the ordinal, or a
/// fatal [`Pdf2TextError::PageNotFound`].
pub fn enumerate_pages(
    layout: &DocumentLayout,
    page: Option<&str>,
) -> Result<Vec<PathBuf>, Pdf2TextError> {
    if let Some(ordinal) = page {
        let expected = layout.page_image_path(ordinal);
        if !expected.is_file() {
            return Err(Pdf2TextError::PageNotFound {
                page: ordinal.to_string(),
                path: expected,
            });
        }
        return Ok(vec![expected]);
    }

    let mut pages: Vec<PathBuf> = std::fs::read_dir(&layout.pngs_dir)
        .map_err(|e| Pdf2TextError::Internal(format!(
            "Cannot read '{}': {}",
            layout.pngs_dir.display(),
            e
        )))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
        })
        .collect();

    pages.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Enumerated {} page images", pages.len());
    Ok(pages)
}
