//! Search, download and delivery of audio tracks

pub mod cookies;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod provider;
pub mod scope;
pub mod source;
pub mod ytdlp;
pub mod ytdlp_errors;

// Re-exports for convenience
pub use error::{FetchError, ProviderError};
pub use fetch::{locate_audio_file, AudioFetcher, DownloadResult};
pub use pipeline::{process_query, ChatSession, RequestOutcome};
pub use provider::{Provider, ProviderOptions};
pub use scope::RequestScope;
pub use source::{MediaEntry, MediaExtractor, SearchOutcome};
pub use ytdlp::YtDlpExtractor;
