//! Maildir error types.

use std::path::PathBuf;

use thiserror::Error;

/// Maildir-related errors.
#[derive(Debug, Error)]
pub enum MaildirError {
    /// Directory not found.
    #[error("maildir not found at {0}")]
    NotFound(PathBuf),

    /// Directory exists but lacks `new/` or `cur/`.
    #[error("not a maildir: {0}")]
    NotAMaildir(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for maildir operations.
pub type MaildirResult<T> = Result<T, MaildirError>;
