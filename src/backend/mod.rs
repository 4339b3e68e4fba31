//! Text-extraction backends.
//!
//! Two interchangeable strategies turn a page image into text:
//!
//! - [`inference::InferenceBackend`] — POSTs the image to a local
//!   OpenAI-compatible chat-completions server and reads the model's reply.
//! - [`tesseract::TesseractBackend`] — runs the Tesseract binary and
//!   captures its standard output.
//!
//! Both implement [`TextBackend`] and share one contract: a `Result`
//! whose `Err` is per-page only. The orchestrator logs the error and
//! writes an empty string for that page; a backend failure never aborts
//! the run.

pub mod inference;
pub mod tesseract;

use crate::config::RunConfig;
use crate::error::BackendError;
use async_trait::async_trait;
use std::path::Path;

pub use inference::InferenceBackend;
pub use tesseract::TesseractBackend;

/// Available text-extraction backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Remote multimodal inference via a chat-completions endpoint (default).
    #[default]
    Inference,
    /// Local Tesseract OCR binary.
    Tesseract,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Inference => "inference",
            BackendKind::Tesseract => "tesseract",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strategy interface: one page image in, its text out.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Which backend this is; used for logging.
    fn kind(&self) -> BackendKind;

    /// Extract the text of one page image.
    async fn extract_text(&self, image_path: &Path) -> Result<String, BackendError>;
}

/// Construct the backend selected by the configuration.
pub fn create_backend(config: &RunConfig) -> Box<dyn TextBackend> {
    match config.backend {
        BackendKind::Inference => Box::new(InferenceBackend::new(config.inference.clone())),
        BackendKind::Tesseract => Box::new(TesseractBackend::new(config.tesseract.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(BackendKind::Inference.to_string(), "inference");
        assert_eq!(BackendKind::Tesseract.to_string(), "tesseract");
    }

    #[test]
    fn factory_honours_selection() {
        let config = RunConfig::builder()
            .backend(BackendKind::Tesseract)
            .build()
            .unwrap();
        assert_eq!(create_backend(&config).kind(), BackendKind::Tesseract);

        let config = RunConfig::builder().build().unwrap();
        assert_eq!(create_backend(&config).kind(), BackendKind::Inference);
    }
}
