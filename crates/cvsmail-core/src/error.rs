//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] cvsmail_config::ConfigError),

    /// Maildir error.
    #[error("maildir error: {0}")]
    Maildir(#[from] cvsmail_maildir::MaildirError),

    /// Undecodable message.
    #[error("message error: {0}")]
    Message(#[from] cvsmail_change::MessageError),

    /// Change record serialization error.
    #[error("store error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
