//! yt-dlp extraction backend
//!
//! One provider attempt is one yt-dlp run: search, download and the
//! `--extract-audio` post-processing step (ffmpeg) happen in a single
//! process, and the final info JSON is read from stdout.

use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::core::process::{run_with_timeout, RunError};
use crate::download::error::ProviderError;
use crate::download::provider::ProviderOptions;
use crate::download::source::{MediaExtractor, SearchOutcome};

/// Extraction backend that shells out to yt-dlp
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    bin: String,
    timeout: Option<Duration>,
}

impl YtDlpExtractor {
    pub fn new(bin: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    /// Builds the yt-dlp command line for one provider attempt.
    ///
    /// The query goes after `--`, so text starting with `-` is never taken for an option.
    pub fn build_args(query: &str, options: &ProviderOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--dump-single-json".into(),
            "--no-simulate".into(),
            "--no-progress".into(),
            "--no-warnings".into(),
            "--default-search".into(),
            options.default_search.into(),
            "--format".into(),
            options.format.into(),
        ];

        if options.no_playlist {
            args.push("--no-playlist".into());
        }

        match options.flat_playlist {
            Some(true) => args.push("--flat-playlist".into()),
            Some(false) => args.push("--no-flat-playlist".into()),
            None => {}
        }

        args.push("--output".into());
        args.push(options.output_template.clone().into_os_string());

        args.push("--extract-audio".into());
        args.push("--audio-format".into());
        args.push(options.audio_format.into());
        args.push("--audio-quality".into());
        args.push(format!("{}K", options.audio_quality_kbps).into());

        if let Some(cookie_file) = &options.cookie_file {
            args.push("--cookies".into());
            args.push(cookie_file.clone().into_os_string());
        }

        args.push("--".into());
        args.push(query.into());
        args
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn extract(&self, query: &str, options: &ProviderOptions) -> Result<SearchOutcome, ProviderError> {
        let mut cmd = Command::new(&self.bin);
        cmd.args(Self::build_args(query, options))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!(
            "Running {} for {} (search: {}, cookies: {})",
            self.bin,
            options.provider,
            options.default_search,
            options.cookie_file.is_some()
        );

        let output = match run_with_timeout(&mut cmd, self.timeout).await {
            Ok(output) => output,
            Err(RunError::TimedOut(limit)) => {
                log::error!("{} timed out after {}s, killed", self.bin, limit.as_secs());
                return Err(ProviderError::Timeout(limit.as_secs()));
            }
            Err(RunError::Io(e)) => {
                log::error!("Failed to run {}: {}", self.bin, e);
                return Err(ProviderError::Io(e));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::warn!(
                "{} exited with {} for {}: {}",
                self.bin,
                output.status,
                options.provider,
                stderr.trim()
            );
            return Err(ProviderError::from_stderr(&stderr));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
