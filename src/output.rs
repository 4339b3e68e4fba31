//! Result types returned by [`crate::run`].
//!
//! A run always produces one [`PageRecord`] per selected page, even for
//! pages whose backend failed — those carry the error text and an empty
//! output file on disk. Callers inspect [`RunStats::failed_pages`] to
//! decide whether a run with partial failures is acceptable.

use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a single page.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    /// 1-indexed position within the processed set.
    pub page_num: usize,
    /// Source page image.
    pub image: PathBuf,
    /// Text file written for this page.
    pub text_path: PathBuf,
    /// Byte length of the extracted text (0 on failure).
    pub text_len: usize,
    /// Wall-clock extraction time for this page.
    pub duration_ms: u64,
    /// Backend failure description, if the page yielded empty output.
    pub error: Option<String>,
}

/// Aggregate statistics for a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Pages selected for processing.
    pub total_pages: usize,
    /// Pages whose backend call succeeded.
    pub extracted_pages: usize,
    /// Pages written as empty text after a backend failure.
    pub failed_pages: usize,
    /// Time spent in pdftoppm (0 when rasterisation was skipped).
    pub rasterise_duration_ms: u64,
    /// Time spent in backend calls and text writes.
    pub extract_duration_ms: u64,
    /// End-to-end run time.
    pub total_duration_ms: u64,
}

/// Everything produced by a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    /// Per-page outcomes in page order.
    pub pages: Vec<PageRecord>,
    /// Aggregate statistics.
    pub stats: RunStats,
    /// Directory holding the page images.
    pub pngs_dir: PathBuf,
    /// Directory holding the text files.
    pub texts_dir: PathBuf,
}
