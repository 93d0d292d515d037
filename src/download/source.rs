//! Extraction backend abstraction.
//!
//! The orchestrator talks to a `MediaExtractor`; production uses
//! [`YtDlpExtractor`](crate::download::ytdlp::YtDlpExtractor), tests plug in a
//! scripted fake.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::download::error::ProviderError;
use crate::download::provider::ProviderOptions;

/// Metadata of one downloaded entry, as reported by the extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    /// Output name predicted before post-processing (`prepare_filename`)
    #[serde(default, rename = "_filename")]
    pub predicted_filename: Option<PathBuf>,
    /// Same prediction under its public key; some yt-dlp versions only emit this one
    #[serde(default)]
    pub filename: Option<PathBuf>,
}

impl MediaEntry {
    /// Predicted output path, before the post-processor changed the container
    pub fn predicted_path(&self) -> Option<&Path> {
        self.predicted_filename.as_deref().or(self.filename.as_deref())
    }

    /// Uploader first, then artist; empty strings count as missing
    pub fn performer(&self) -> Option<&str> {
        [self.uploader.as_deref(), self.artist.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// What an extraction call returned: one entry, or a search-result list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    /// A playlist-shaped result; yt-dlp writes `null` for entries it failed to resolve
    EntryList { entries: Vec<Option<MediaEntry>> },
    SingleEntry(MediaEntry),
}

impl SearchOutcome {
    /// Selects the entry to deliver: the entry itself, or the first resolved list element
    pub fn into_first(self) -> Option<MediaEntry> {
        match self {
            SearchOutcome::SingleEntry(entry) => Some(entry),
            SearchOutcome::EntryList { entries } => entries.into_iter().flatten().next(),
        }
    }
}

/// Trait for extraction backends.
///
/// `extract` searches with the provider's settings, downloads the first hit
/// and post-processes it into `options.audio_format` under
/// `options.output_template`.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Human-readable name of this backend (e.g., "yt-dlp")
    fn name(&self) -> &str;

    /// Runs search + download for `query`.
    async fn extract(&self, query: &str, options: &ProviderOptions) -> Result<SearchOutcome, ProviderError>;
}
