//! Configuration types for a pdf2text run.
//!
//! All run behaviour is controlled through [`RunConfig`], built via its
//! [`RunConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to construct runs from CLI flags, share them with tests, and diff two
//! runs to understand why their outputs differ.
//!
//! The inference endpoint is deliberately part of this struct rather than a
//! literal inside the backend: the server address is deployment-specific
//! and must be supplied (or defaulted) by the caller.

use crate::backend::BackendKind;
use crate::error::Pdf2TextError;
use crate::progress::ProgressSink;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default rasterisation resolution in DPI.
///
/// 300 DPI keeps small print legible for both Tesseract and vision models
/// while a page stays comfortably below typical request-size limits.
pub const DEFAULT_DPI: u32 = 300;

/// Default chat-completions server address. The LM Studio local server
/// listens here out of the box; the `/v1/chat/completions` route is
/// appended by the backend.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:1234";

/// Default model identifier requested from the inference server.
pub const DEFAULT_MODEL: &str = "google/gemma-3-27b";

/// Default sampling temperature. Near-zero keeps the model faithful to
/// what is printed on the page; transcription wants no creativity.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Sentinel for "no output-length limit" in the chat-completions request.
pub const UNLIMITED_TOKENS: i64 = -1;

/// Default Tesseract language pack pair (primary + secondary).
pub const DEFAULT_LANGUAGES: &str = "rus+eng";

/// Default Tesseract OCR engine mode. Mode 0 selects the legacy engine.
pub const DEFAULT_ENGINE_MODE: u8 = 0;

/// Settings for the remote inference backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the chat-completions server, without the API route.
    pub endpoint: String,
    /// Model identifier passed in the request body.
    pub model: String,
    /// System message override. `None` uses [`crate::prompts::DEFAULT_SYSTEM_PROMPT`].
    pub system_prompt: Option<String>,
    /// User-message text override. `None` uses [`crate::prompts::DEFAULT_USER_PROMPT`].
    pub user_prompt: Option<String>,
    /// Sampling temperature for the completion.
    pub temperature: f32,
    /// Output-length cap; [`UNLIMITED_TOKENS`] means no cap.
    pub max_tokens: i64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            user_prompt: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: UNLIMITED_TOKENS,
        }
    }
}

/// Settings for the local Tesseract backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesseractConfig {
    /// Language spec passed to `-l`, e.g. `rus+eng`.
    pub languages: String,
    /// Engine mode passed to `--oem`.
    pub engine_mode: u8,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.to_string(),
            engine_mode: DEFAULT_ENGINE_MODE,
        }
    }
}

/// Configuration for a PDF-to-text run.
///
/// Built via [`RunConfig::builder()`] or using [`RunConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2text::{BackendKind, RunConfig};
///
/// let config = RunConfig::builder()
///     .backend(BackendKind::Tesseract)
///     .dpi(300)
///     .page("002")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct RunConfig {
    /// Which text-extraction backend processes each page image.
    pub backend: BackendKind,

    /// Rasterisation DPI used by pdftoppm. Range: 72–600. Default: 300.
    pub dpi: u32,

    /// Skip rasterisation and reuse the page images already present in the
    /// pngs directory. The run fails if none exist.
    pub skip_rasterize: bool,

    /// Restrict the run to a single page. The value is the zero-padded
    /// ordinal exactly as it appears in the image file name (`--page 003`
    /// selects `<stem>-page-003.png`). `None` processes every page.
    pub page: Option<String>,

    /// Remote inference backend settings.
    pub inference: InferenceConfig,

    /// Local Tesseract backend settings.
    pub tesseract: TesseractConfig,

    /// Optional per-page progress callbacks.
    pub progress: Option<ProgressSink>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            dpi: DEFAULT_DPI,
            skip_rasterize: false,
            page: None,
            inference: InferenceConfig::default(),
            tesseract: TesseractConfig::default(),
            progress: None,
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("backend", &self.backend)
            .field("dpi", &self.dpi)
            .field("skip_rasterize", &self.skip_rasterize)
            .field("page", &self.page)
            .field("inference", &self.inference)
            .field("tesseract", &self.tesseract)
            .field("progress", &self.progress.as_ref().map(|_| "<dyn RunProgress>"))
            .finish()
    }
}

impl RunConfig {
    /// Create a new builder for `RunConfig`.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn backend(mut self, kind: BackendKind) -> Self {
        self.config.backend = kind;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 600);
        self
    }

    pub fn skip_rasterize(mut self, v: bool) -> Self {
        self.config.skip_rasterize = v;
        self
    }

    pub fn page(mut self, ordinal: impl Into<String>) -> Self {
        self.config.page = Some(ordinal.into());
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.inference.endpoint = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.inference.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.inference.system_prompt = Some(prompt.into());
        self
    }

    pub fn user_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.inference.user_prompt = Some(prompt.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.inference.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn languages(mut self, spec: impl Into<String>) -> Self {
        self.config.tesseract.languages = spec.into();
        self
    }

    pub fn engine_mode(mut self, mode: u8) -> Self {
        self.config.tesseract.engine_mode = mode;
        self
    }

    pub fn progress(mut self, sink: ProgressSink) -> Self {
        self.config.progress = Some(sink);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RunConfig, Pdf2TextError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 600 {
            return Err(Pdf2TextError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if c.inference.endpoint.trim().is_empty() {
            return Err(Pdf2TextError::InvalidConfig(
                "Inference endpoint must not be empty".into(),
            ));
        }
        if c.tesseract.languages.trim().is_empty() {
            return Err(Pdf2TextError::InvalidConfig(
                "Tesseract language spec must not be empty".into(),
            ));
        }
        if let Some(ref page) = c.page {
            if page.is_empty() || !page.chars().all(|ch| ch.is_ascii_digit()) {
                return Err(Pdf2TextError::InvalidConfig(format!(
                    "--page expects a zero-padded page number, got '{}'",
                    page
                )));
            }
        }
        Ok(self.config)
    }
}
