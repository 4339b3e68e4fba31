//! Local OCR backend: page image → Tesseract subprocess → stdout text.
//!
//! Runs the system `tesseract` binary with a two-language spec and an
//! explicit engine mode, reading the recognised text from standard
//! output. Like the inference backend, every failure here is per-page:
//! the caller logs it and moves on to the next image.

use crate::config::TesseractConfig;
use crate::error::BackendError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use super::{BackendKind, TextBackend};

/// Backend that extracts text with the Tesseract OCR binary.
pub struct TesseractBackend {
    config: TesseractConfig,
    /// Path to the tesseract binary; resolved through PATH by default.
    binary: PathBuf,
}

impl TesseractBackend {
    /// Create a backend with the given language/engine settings.
    pub fn new(config: TesseractConfig) -> Self {
        Self {
            config,
            binary: PathBuf::from("tesseract"),
        }
    }

    /// Override the tesseract binary location.
    pub fn with_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = path.into();
        self
    }

    /// Run Tesseract on an image file, capturing stdout as the result.
    async fn run_tesseract(&self, image_path: &Path) -> Result<String, BackendError> {
        debug!(
            "{} {} stdout -l {} --oem {}",
            self.binary.display(),
            image_path.display(),
            self.config.languages,
            self.config.engine_mode
        );

        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.config.languages])
            .args(["--oem", &self.config.engine_mode.to_string()])
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(BackendError::OcrProcess(format!(
                    "tesseract exited with {}: {}",
                    output.status,
                    stderr.trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BackendError::BackendUnavailable(
                    "tesseract not found (install tesseract-ocr)".to_string(),
                ))
            }
            Err(e) => Err(BackendError::Io(e)),
        }
    }
}

#[async_trait]
impl TextBackend for TesseractBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Tesseract
    }

    async fn extract_text(&self, image_path: &Path) -> Result<String, BackendError> {
        self.run_tesseract(image_path).await
    }
}
