//! Derived output directory tree for a document.
//!
//! Every artefact of a run lives under a directory named after the PDF's
//! file stem, next to the PDF itself:
//!
//! ```text
//! report.pdf
//! report/
//! ├── pngs/   report-page-001.png, report-page-002.png, …
//! └── texts/  report-page-001.txt, report-page-002.txt, …
//! ```
//!
//! The tree is created once per run and never cleaned or versioned; a
//! re-run overwrites files in place.

use crate::error::Pdf2TextError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The directory tree derived from a PDF path.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    /// PDF file stem; seeds every derived name.
    pub stem: String,
    /// `<pdf-parent>/<stem>` — the per-document root.
    pub root: PathBuf,
    /// Page images directory.
    pub pngs_dir: PathBuf,
    /// Extracted text directory.
    pub texts_dir: PathBuf,
}

impl DocumentLayout {
    /// Derive the layout for a PDF path without touching the filesystem.
    pub fn for_pdf(pdf_path: &Path) -> Result<Self, Pdf2TextError> {
        let stem = pdf_path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                Pdf2TextError::Internal(format!(
                    "Cannot derive a document name from '{}'",
                    pdf_path.display()
                ))
            })?;

        let parent = pdf_path.parent().unwrap_or_else(|| Path::new("."));
        let root = parent.join(&stem);

        Ok(Self {
            pngs_dir: root.join("pngs"),
            texts_dir: root.join("texts"),
            root,
            stem,
        })
    }

    /// Create the pngs and texts directories (parents included).
    pub async fn ensure_dirs(&self) -> Result<(), Pdf2TextError> {
        for dir in [&self.pngs_dir, &self.texts_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| Pdf2TextError::OutputDirFailed {
                    path: dir.clone(),
                    source: e,
                })?;
        }
        debug!("Output tree ready at {}", self.root.display());
        Ok(())
    }

    /// Prefix handed to pdftoppm; pages materialise as `<prefix>-<NNN>.png`.
    pub fn page_prefix(&self) -> PathBuf {
        self.pngs_dir.join(format!("{}-page", self.stem))
    }

    /// Expected image file name for an explicit page ordinal.
    pub fn page_image_path(&self, ordinal: &str) -> PathBuf {
        self.pngs_dir
            .join(format!("{}-page-{}.png", self.stem, ordinal))
    }
}
