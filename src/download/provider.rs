//! Search providers and the yt-dlp options each of them runs with

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::config;

/// Search backend, in fallback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// SoundCloud, tried first
    Primary,
    /// YouTube, tried once after any primary failure
    Secondary,
}

impl Provider {
    /// Human-readable platform name used in status and error messages
    pub fn label(self) -> &'static str {
        match self {
            Provider::Primary => "SoundCloud",
            Provider::Secondary => "YouTube",
        }
    }

    /// yt-dlp `--default-search` prefix; the trailing `1` limits the search to one result
    pub fn search_prefix(self) -> &'static str {
        match self {
            Provider::Primary => "scsearch1",
            Provider::Secondary => "ytsearch1",
        }
    }

    /// Builds the download options for this provider.
    ///
    /// The cookie file is only attached to the secondary provider; the
    /// primary never needs a session.
    pub fn options(self, output_dir: &Path, cookie_file: Option<&Path>) -> ProviderOptions {
        ProviderOptions {
            provider: self,
            default_search: self.search_prefix(),
            format: "bestaudio/best",
            no_playlist: true,
            output_template: output_dir.join("%(title)s.%(ext)s"),
            audio_format: config::AUDIO_FORMAT,
            audio_quality_kbps: config::AUDIO_QUALITY_KBPS,
            // SoundCloud search hits must be resolved to real track entries
            flat_playlist: (self == Provider::Primary).then_some(false),
            cookie_file: match self {
                Provider::Primary => None,
                Provider::Secondary => cookie_file.map(Path::to_path_buf),
            },
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the extractor needs to run one provider attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOptions {
    pub provider: Provider,
    pub default_search: &'static str,
    pub format: &'static str,
    pub no_playlist: bool,
    pub output_template: PathBuf,
    pub audio_format: &'static str,
    pub audio_quality_kbps: u32,
    /// `Some(false)` forces full extraction of search results
    pub flat_playlist: Option<bool>,
    pub cookie_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_options() {
        let opts = Provider::Primary.options(Path::new("downloads/req"), Some(Path::new("downloads/req/cookies.txt")));
        assert_eq!(opts.default_search, "scsearch1");
        assert_eq!(opts.format, "bestaudio/best");
        assert!(opts.no_playlist);
        assert_eq!(opts.flat_playlist, Some(false));
        assert_eq!(opts.audio_format, "mp3");
        assert_eq!(opts.audio_quality_kbps, 192);
        assert_eq!(opts.output_template, PathBuf::from("downloads/req/%(title)s.%(ext)s"));
        // primary never carries cookies
        assert!(opts.cookie_file.is_none());
    }

    #[test]
    fn test_secondary_options() {
        let opts = Provider::Secondary.options(Path::new("dl"), Some(Path::new("dl/cookies.txt")));
        assert_eq!(opts.default_search, "ytsearch1");
        assert_eq!(opts.flat_playlist, None);
        assert_eq!(opts.cookie_file, Some(PathBuf::from("dl/cookies.txt")));

        let opts = Provider::Secondary.options(Path::new("dl"), None);
        assert!(opts.cookie_file.is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Provider::Primary.to_string(), "SoundCloud");
        assert_eq!(Provider::Secondary.to_string(), "YouTube");
    }
}
