//! Progress-callback trait for per-page run events.
//!
//! Inject an [`Arc<dyn RunProgress>`] via
//! [`crate::config::RunConfigBuilder::progress`] to receive events as the
//! pipeline processes each page. The callback approach is the
//! least-invasive integration point: callers can forward events to a
//! terminal progress bar, a log file, or a database record without the
//! library knowing anything about how the host application reports them.
//!
//! Pages are processed strictly one after another, so implementations are
//! never called concurrently; the `Send + Sync` bound only makes the sink
//! shareable across the async boundary.

use std::sync::Arc;

/// Called by the pipeline as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait RunProgress: Send + Sync {
    /// Called once after page enumeration, before any extraction.
    fn on_run_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before a page's backend call.
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when a page's text was extracted and written.
    fn on_page_complete(&self, page_num: usize, total_pages: usize, text_len: usize) {
        let _ = (page_num, total_pages, text_len);
    }

    /// Called when a page's backend failed; an empty text file was still
    /// written and the run continues.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called once after all pages have been attempted.
    fn on_run_complete(&self, total_pages: usize, extracted: usize) {
        let _ = (total_pages, extracted);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgress;

impl RunProgress for NoopProgress {}

/// Convenience alias matching the type stored in [`crate::config::RunConfig`].
pub type ProgressSink = Arc<dyn RunProgress>;
