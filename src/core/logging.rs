//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Cookie configuration logging
//! - Startup diagnostics for the external tools

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::{config, process};

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger is already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the cookie configuration at application startup.
///
/// The secondary provider works without cookies for most tracks; only
/// age- or consent-gated videos need them, so a missing secret is a warning.
pub fn log_cookies_configuration(app_config: &config::Config) {
    if app_config.has_cookies() {
        log::info!(
            "✅ {}: set, a cookie file will be written per request for the YouTube fallback",
            config::COOKIES_ENV
        );
    } else {
        log::warn!(
            "⚠️  {}: not set, YouTube results behind a sign-in check will fail",
            config::COOKIES_ENV
        );
        log::warn!(
            "   Export cookies.txt from a logged-in browser and put its content into {}",
            config::COOKIES_ENV
        );
    }
}

/// Logs yt-dlp and ffmpeg versions; a missing tool is reported, not fatal.
pub async fn log_tool_versions(ytdl_bin: &str) {
    match process::tool_version(ytdl_bin, "--version").await {
        Some(version) => log::info!("yt-dlp version: {}", version),
        None => log::error!("❌ {} is not runnable, every download will fail", ytdl_bin),
    }
    match process::tool_version("ffmpeg", "-version").await {
        Some(version) => log::info!("{}", version),
        None => log::error!("❌ ffmpeg not found in PATH, MP3 transcoding will fail"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    #[test]
    fn test_init_logger_creates_log_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        // A second init in the same test binary returns Err; either way the file is created
        let _ = init_logger(path);
        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_init_logger_fails_for_missing_directory() {
        let result = init_logger("/nonexistent-dir/for/sure/tunefetch.log");
        assert!(result.is_err());
    }
}
