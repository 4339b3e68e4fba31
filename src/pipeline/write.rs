//! Output writer: one text file per page image.
//!
//! The text path shares the image's stem and lives in the texts
//! directory. Writes overwrite unconditionally — a re-run always
//! replaces prior output, and there is no atomicity guarantee.

use crate::error::Pdf2TextError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Destination text path for a page image: same stem, `.txt`, texts dir.
pub fn text_path_for(image_path: &Path, texts_dir: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let mut name = stem;
    name.push(".txt");
    texts_dir.join(name)
}

/// Write a page's extracted text, replacing any existing file.
pub async fn write_page_text(path: &Path, text: &str) -> Result<(), Pdf2TextError> {
    tokio::fs::write(path, text)
        .await
        .map_err(|e| Pdf2TextError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}
