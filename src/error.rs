//! Error types for the pdf2text library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2TextError`] — **Fatal**: the run cannot proceed at all
//!   (missing input file, rasterisation failure, requested page absent).
//!   Returned as `Err(Pdf2TextError)` from [`crate::run`] and mapped to
//!   process exit code 1 by the CLI.
//!
//! * [`BackendError`] — **Non-fatal**: a single page's text extraction
//!   failed (unreachable endpoint, bad HTTP status, malformed reply, OCR
//!   process failure). The orchestrator logs it and writes an empty text
//!   file for that page; the remaining pages are still processed.
//!
//! There are no retries in either path: a backend error is terminal for
//! its page, a fatal error is terminal for the run.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2text library.
///
/// Page-level extraction failures use [`BackendError`] and never surface
/// here — they are absorbed into empty page output by the orchestrator.
#[derive(Debug, Error)]
pub enum Pdf2TextError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Pipeline errors ───────────────────────────────────────────────────
    /// Could not create the derived output directory tree.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external rasterisation process failed or could not be spawned.
    #[error("Rasterisation failed: {detail}")]
    RasterisationFailed { detail: String },

    /// `--skip-extraction` was requested but the pngs directory holds no
    /// page images to work from.
    #[error("No page images found in '{dir}'\nRun without --skip-extraction to rasterise the PDF first.")]
    NoPageImages { dir: PathBuf },

    /// An explicit `--page` was requested but its image file is absent.
    #[error("Page {page} not found: expected '{path}'")]
    PageNotFound { page: String, path: PathBuf },

    /// Could not write a page's text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal, per-page error from a text-extraction backend.
///
/// Both backends share one contract: any failure here yields an empty
/// string for the page, logged by the caller, and the run continues.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP request to the inference endpoint failed outright
    /// (connection refused, DNS, broken transport).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The inference endpoint answered with a non-success status.
    #[error("Inference API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The response body did not match the chat-completion shape.
    #[error("Malformed inference reply: {0}")]
    MalformedReply(String),

    /// The OCR process exited non-zero.
    #[error("OCR failed: {0}")]
    OcrProcess(String),

    /// A required external binary is not installed.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// I/O failure reading the page image or talking to a subprocess.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
