//! Error types for startable.
//!
//! Library crates use [`StartableError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::io::ErrorKind;
use std::path::PathBuf;

/// Top-level error type for all startable operations.
#[derive(Debug, thiserror::Error)]
pub enum StartableError {
    /// A file the pipeline needs does not exist.
    #[error("file not found: {path:?}")]
    NotFound { path: PathBuf },

    /// A file exists but cannot be read or written.
    #[error("permission denied: {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog CSV could not be parsed or written.
    #[error("CSV error at {path:?}: {message}")]
    Csv { path: PathBuf, message: String },

    /// Transport-level HTTP failure (connect, TLS, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The remote API answered with a status other than 200.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A response body or text fragment could not be interpreted.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Data validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StartableError>;

impl StartableError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a CSV error for the given file.
    pub fn csv(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Csv {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    ///
    /// Missing files and permission failures get their own variants so
    /// callers can report them distinctly.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            ErrorKind::NotFound => Self::NotFound { path },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// Whether this error is a per-item fetch failure that the enrichment
    /// pipeline absorbs instead of propagating.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Api { .. } | Self::Parse { .. }
        )
    }
}
