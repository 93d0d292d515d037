use thiserror::Error;

use crate::core::config::ConfigError;
use crate::download::error::FetchError;

/// Centralized error type for the application
///
/// Request-level failures (search, download, upload) end up here before they
/// are logged by the handler. Uses `thiserror` for conversions and display.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors (only fatal at startup)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Both providers failed, or the query was rejected
    #[error("Download error: {0}")]
    Fetch(#[from] FetchError),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Sending the audio attachment failed
    #[error("Upload failed: {0}")]
    Upload(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
