//! Error types for resumekit.
//!
//! Library crates use [`ResumeKitError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all resumekit operations.
#[derive(Debug, thiserror::Error)]
pub enum ResumeKitError {
    /// The requested source could not be read: missing file, failed
    /// request, failed login, or timeout.
    #[error("source unavailable: {source_id}: {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    /// A binary document parser could not interpret the content.
    #[error("unsupported format: {source_id} ({format}): {message}")]
    UnsupportedFormat {
        source_id: String,
        format: String,
        message: String,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error outside of source acquisition.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Template rendering error.
    #[error("render error: {0}")]
    Render(String),

    /// Completion request failed or returned nothing usable.
    #[error("llm error: {0}")]
    Llm(String),

    /// The profile prompter could not produce an answer.
    #[error("prompt error: {0}")]
    Prompt(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ResumeKitError>;

impl ResumeKitError {
    /// Create a source-unavailable error for the given source identifier.
    pub fn source_unavailable(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported-format error for a document that failed to parse.
    pub fn unsupported_format(
        source_id: impl Into<String>,
        format: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnsupportedFormat {
            source_id: source_id.into(),
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure came from reaching the source rather than
    /// from parsing its content.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}
