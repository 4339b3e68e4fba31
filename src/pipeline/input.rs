//! Input resolution: validate the user-supplied PDF path.
//!
//! We validate the PDF magic bytes (`%PDF`) before doing any work so
//! callers get a meaningful error rather than a rasteriser failure on a
//! file that was never a PDF in the first place.

use crate::error::Pdf2TextError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a local file path, validating existence and PDF magic bytes.
pub fn resolve_pdf(path: &Path) -> Result<PathBuf, Pdf2TextError> {
    if !path.exists() {
        return Err(Pdf2TextError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    // Check read permission by attempting to open
    match std::fs::File::open(path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(Pdf2TextError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2TextError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Pdf2TextError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Resolved PDF: {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let result = resolve_pdf(Path::new("/definitely/not/a/real/file.pdf"));
        assert!(matches!(result, Err(Pdf2TextError::FileNotFound { .. })));
    }

    #[test]
    fn wrong_magic_is_not_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"PK\x03\x04not a pdf").unwrap();

        let result = resolve_pdf(&path);
        assert!(matches!(result, Err(Pdf2TextError::NotAPdf { .. })));
    }

    #[test]
    fn pdf_magic_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("real.pdf");
        std::fs::write(&path, b"%PDF-1.7\n%minimal\n").unwrap();

        let resolved = resolve_pdf(&path).unwrap();
        assert_eq!(resolved, path);
    }
}
