//! Instruction strings for the remote inference backend.
//!
//! Centralising the prompts here serves two purposes:
//!
//! 1. **Single source of truth** — changing the transcription instruction
//!    requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the exact strings that end
//!    up in the request body without talking to a real model server.
//!
//! Callers can override both via [`crate::config::InferenceConfig`] (or the
//! `PDF2TEXT_SYSTEM_PROMPT` / `PDF2TEXT_USER_PROMPT` environment variables
//! through the CLI); the constants here are used when no override is set.

/// Default system message for page transcription.
///
/// Deliberately a bare transcription order: the model must not summarise,
/// describe, or annotate — the output file is the page text and nothing else.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "Recognize this page and output only the verbatim text, nothing else.";

/// Default user-message text sent alongside the page image.
///
/// The instruction is repeated in the user turn because some chat-completion
/// servers weigh the message adjacent to the image more heavily than the
/// system message.
pub const DEFAULT_USER_PROMPT: &str =
    "Recognize this page and output only the verbatim text, nothing else.";
