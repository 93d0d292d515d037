//! Download orchestration: provider fallback and output path normalization
//!
//! Flow for one query:
//!   Primary (SoundCloud) → on any failure → Secondary (YouTube, with cookies)
//! Each attempt searches, downloads and transcodes to MP3, then locates the
//! resulting file on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::core::config;
use crate::download::error::{FetchError, ProviderError};
use crate::download::provider::Provider;
use crate::download::source::MediaExtractor;

/// A downloaded, transcoded track ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// Local audio file
    pub path: PathBuf,
    /// Display title
    pub title: String,
    /// Uploader or artist, when the platform reports one
    pub performer: Option<String>,
    /// Provider that produced the file
    pub provider: Provider,
}

/// Runs queries against the providers in fallback order
pub struct AudioFetcher {
    extractor: Arc<dyn MediaExtractor>,
}

impl AudioFetcher {
    pub fn new(extractor: Arc<dyn MediaExtractor>) -> Self {
        Self { extractor }
    }

    /// Searches, downloads and transcodes the best match for `query`.
    ///
    /// The primary provider is tried first without cookies; any failure
    /// triggers exactly one secondary attempt, which gets `cookie_file`.
    ///
    /// # Errors
    /// * `FetchError::EmptyQuery` - blank query, no provider contacted
    /// * `FetchError::Exhausted` - both providers failed
    pub async fn fetch_audio(
        &self,
        query: &str,
        output_dir: &Path,
        cookie_file: Option<&Path>,
    ) -> Result<DownloadResult, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::EmptyQuery);
        }

        let primary = match self.attempt(Provider::Primary, query, output_dir, None).await {
            Ok(result) => return Ok(result),
            Err(e) => {
                log::warn!("{} failed ({}): {}", Provider::Primary, e.subcategory(), e);
                e
            }
        };

        log::info!("Falling back to {} for {:?}", Provider::Secondary, query);

        match self.attempt(Provider::Secondary, query, output_dir, cookie_file).await {
            Ok(result) => Ok(result),
            Err(secondary) => {
                log::error!(
                    "{} fallback failed ({}): {}",
                    Provider::Secondary,
                    secondary.subcategory(),
                    secondary
                );
                Err(FetchError::Exhausted { primary, secondary })
            }
        }
    }

    async fn attempt(
        &self,
        provider: Provider,
        query: &str,
        output_dir: &Path,
        cookie_file: Option<&Path>,
    ) -> Result<DownloadResult, ProviderError> {
        let options = provider.options(output_dir, cookie_file);
        log::info!("🔎 Searching {} via {} for {:?}", provider, self.extractor.name(), query);

        let entry = self
            .extractor
            .extract(query, &options)
            .await?
            .into_first()
            .ok_or(ProviderError::EmptyResults)?;

        let path = locate_audio_file(entry.predicted_path(), output_dir, options.audio_format)?;

        let title = entry
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| file_name_of(&path));
        let performer = entry.performer().map(str::to_string);

        log::info!("✅ {} delivered {:?} at {}", provider, title, path.display());

        Ok(DownloadResult {
            path,
            title,
            performer,
            provider,
        })
    }
}

/// Finds the post-processed audio file.
///
/// The extractor predicts the output name before post-processing swaps the
/// container, so the prediction's extension is replaced with `extension`.
/// When that path does not exist, the newest `*.<extension>` file in
/// `output_dir` is taken instead.
pub fn locate_audio_file(predicted: Option<&Path>, output_dir: &Path, extension: &str) -> Result<PathBuf, ProviderError> {
    if let Some(predicted) = predicted {
        let expected = predicted.with_extension(extension);
        if expected.is_file() {
            log::debug!("File found at expected path: {}", expected.display());
            return Ok(expected);
        }
        log::warn!("File not found at expected path: {}", expected.display());
    }

    newest_with_extension(output_dir, extension)?.ok_or_else(|| {
        log::error!("No .{} files in {}", extension, output_dir.display());
        ProviderError::FileMissing
    })
}

fn newest_with_extension(dir: &Path, extension: &str) -> std::io::Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs_err::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }

        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        // Creation time is not available on every filesystem
        let stamp = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        if newest.as_ref().map_or(true, |(best, _)| stamp >= *best) {
            newest = Some((stamp, path));
        }
    }

    Ok(newest.map(|(_, path)| path))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("audio.{}", config::AUDIO_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    #[test]
    fn test_predicted_name_gets_audio_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mp3 = dir.path().join("Harder, Better, Faster, Stronger.mp3");
        fs::write(&mp3, b"ID3").unwrap();

        let predicted = dir.path().join("Harder, Better, Faster, Stronger.webm");
        let found = locate_audio_file(Some(&predicted), dir.path(), "mp3").unwrap();
        assert_eq!(found, mp3);
    }

    #[test]
    fn test_only_last_extension_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let mp3 = dir.path().join("Mr. Brightside.mp3");
        fs::write(&mp3, b"ID3").unwrap();

        let predicted = dir.path().join("Mr. Brightside.opus");
        assert_eq!(locate_audio_file(Some(&predicted), dir.path(), "mp3").unwrap(), mp3);
    }

    #[test]
    fn test_falls_back_to_newest_mp3() {
        let dir = tempfile::tempdir().unwrap();
        let older = dir.path().join("older.mp3");
        let newer = dir.path().join("newer.mp3");
        fs::write(&older, b"ID3").unwrap();
        std::thread::sleep(Duration::from_millis(20));
        fs::write(&newer, b"ID3").unwrap();
        fs::write(dir.path().join("cookies.txt"), b"x").unwrap();

        let predicted = dir.path().join("sanitized differently.webm");
        assert_eq!(locate_audio_file(Some(&predicted), dir.path(), "mp3").unwrap(), newer);
        assert_eq!(locate_audio_file(None, dir.path(), "mp3").unwrap(), newer);
    }

    #[test]
    fn test_no_audio_file_is_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("track.webm"), b"x").unwrap();

        let result = locate_audio_file(Some(&dir.path().join("track.webm")), dir.path(), "mp3");
        assert!(matches!(result, Err(ProviderError::FileMissing)));
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("dl/abc/Track.mp3")), "Track.mp3");
    }
}
