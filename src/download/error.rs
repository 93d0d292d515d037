use thiserror::Error;

use crate::core::utils::ytdlp_error_summary;
use crate::download::provider::Provider;
use crate::download::ytdlp_errors::{analyze_ytdlp_error, is_auth_gate, YtDlpErrorType};

/// Why a single provider attempt failed
#[derive(Debug, Error)]
pub enum ProviderError {
    /// yt-dlp reported an empty search; carries its `ERROR:` text
    #[error("{0}")]
    NoResults(String),
    /// yt-dlp succeeded but the result held no resolvable entry
    #[error("no results found")]
    EmptyResults,
    /// yt-dlp failed (non-zero exit, extractor or post-processing error)
    #[error("{0}")]
    Extractor(String),
    /// The platform wants a signed-in session
    #[error("{0}")]
    AuthRequired(String),
    /// Download reported success but no audio file is on disk
    #[error("mp3 file not found after download")]
    FileMissing,
    /// The extractor ran past its deadline and was killed
    #[error("yt-dlp timed out after {0}s")]
    Timeout(u64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unreadable yt-dlp output: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    /// Builds an error from yt-dlp stderr, keeping only its `ERROR:` lines
    pub fn from_stderr(stderr: &str) -> Self {
        let summary = ytdlp_error_summary(stderr);
        match analyze_ytdlp_error(&summary) {
            YtDlpErrorType::AuthRequired => ProviderError::AuthRequired(summary),
            YtDlpErrorType::NoResults => ProviderError::NoResults(summary),
            YtDlpErrorType::Other if summary.is_empty() => {
                ProviderError::Extractor("yt-dlp exited with an error and no output".to_string())
            }
            YtDlpErrorType::Other => ProviderError::Extractor(summary),
        }
    }

    /// Whether the failure text indicates a sign-in / cookie gate
    pub fn requires_auth(&self) -> bool {
        matches!(self, ProviderError::AuthRequired(_)) || is_auth_gate(&self.to_string())
    }

    /// Returns subcategory for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            ProviderError::NoResults(_) | ProviderError::EmptyResults => "no_results",
            ProviderError::Extractor(_) => "extractor",
            ProviderError::AuthRequired(_) => "auth_required",
            ProviderError::FileMissing => "file_not_found",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Io(_) => "io",
            ProviderError::Json(_) => "json",
        }
    }
}

/// Failure of a whole `fetch_audio` call
#[derive(Debug, Error)]
pub enum FetchError {
    /// Rejected before any provider was contacted
    #[error("empty query")]
    EmptyQuery,
    /// Both providers failed; carries each provider's error
    #[error("{} error: {primary}; {} error: {secondary}", Provider::Primary, Provider::Secondary)]
    Exhausted {
        primary: ProviderError,
        secondary: ProviderError,
    },
}

impl FetchError {
    /// Authentication is judged on the secondary failure, the only provider that takes cookies
    pub fn requires_auth(&self) -> bool {
        match self {
            FetchError::EmptyQuery => false,
            FetchError::Exhausted { secondary, .. } => secondary.requires_auth(),
        }
    }
}
