//! Runtime configuration
//!
//! Everything the bot reads from the environment is collected once at startup
//! into an immutable [`Config`] that is passed to the router and the
//! orchestrator. Nothing below reads the environment after that point.

use secrecy::SecretString;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Container the post-processor transcodes every download into
pub const AUDIO_FORMAT: &str = "mp3";

/// Transcoding quality target (kbps)
pub const AUDIO_QUALITY_KBPS: u32 = 192;

/// Name of the cookie file materialized inside a request scope
pub const COOKIES_FILE_NAME: &str = "cookies.txt";

/// Environment variable holding the cookie file content
pub const COOKIES_ENV: &str = "YT_COOKIES_CONTENT";

/// Environment variables accepted for the bot token, in priority order
pub const TOKEN_ENVS: [&str; 3] = ["TELEGRAM_TOKEN", "BOT_TOKEN", "TELOXIDE_TOKEN"];

/// Default values for optional settings
pub mod defaults {
    /// Working directory for downloads and cookie files
    pub const DOWNLOAD_DIR: &str = "downloads";

    /// yt-dlp executable looked up in PATH
    pub const YTDL_BIN: &str = "yt-dlp";

    /// Log file written next to the console output
    pub const LOG_FILE_PATH: &str = "tunefetch.log";
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Uploads of long tracks over a slow link need the headroom
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bot token is not set (expected one of TELEGRAM_TOKEN, BOT_TOKEN, TELOXIDE_TOKEN)")]
    MissingToken,

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Immutable process configuration
#[derive(Debug)]
pub struct Config {
    /// Telegram bot token; only the bot mode requires it
    pub bot_token: Option<SecretString>,
    /// Netscape cookie file content for the secondary provider, `\n` still escaped
    pub cookies_content: Option<SecretString>,
    /// Working directory holding every transient file
    pub download_dir: PathBuf,
    /// yt-dlp executable
    pub ytdl_bin: String,
    /// Upper bound for one extractor run; `None` waits indefinitely
    pub ytdlp_timeout: Option<Duration>,
    /// Custom Bot API server (local `telegram-bot-api`)
    pub bot_api_url: Option<Url>,
    /// Log file path
    pub log_file_path: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bot_token = TOKEN_ENVS
            .iter()
            .find_map(|name| get(*name))
            .map(SecretString::from);

        let cookies_content = get(COOKIES_ENV).map(SecretString::from);

        let download_dir = get("DOWNLOAD_DIR").unwrap_or_else(|| defaults::DOWNLOAD_DIR.to_string());
        let download_dir = PathBuf::from(shellexpand::tilde(&download_dir).into_owned());

        let ytdl_bin = get("YTDL_BIN").unwrap_or_else(|| defaults::YTDL_BIN.to_string());

        let ytdlp_timeout = match get("YTDLP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    name: "YTDLP_TIMEOUT_SECS",
                    reason: format!("{}: {}", raw, e),
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let bot_api_url = get("BOT_API_URL")
            .map(|raw| {
                Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                    name: "BOT_API_URL",
                    reason: format!("{}: {}", raw, e),
                })
            })
            .transpose()?;

        let log_file_path = get("LOG_FILE_PATH").unwrap_or_else(|| defaults::LOG_FILE_PATH.to_string());

        Ok(Self {
            bot_token,
            cookies_content,
            download_dir,
            ytdl_bin,
            ytdlp_timeout,
            bot_api_url,
            log_file_path,
        })
    }

    /// Returns the bot token or `ConfigError::MissingToken`
    pub fn require_token(&self) -> Result<&SecretString, ConfigError> {
        self.bot_token.as_ref().ok_or(ConfigError::MissingToken)
    }

    /// Whether a cookie secret is configured for the secondary provider
    pub fn has_cookies(&self) -> bool {
        self.cookies_content.is_some()
    }
}
