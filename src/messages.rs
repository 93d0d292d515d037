//! User-facing texts

use indoc::formatdoc;

use crate::core::config::COOKIES_ENV;
use crate::core::error::AppError;
use crate::core::utils::{truncate_string_safe, TELEGRAM_MESSAGE_LIMIT};
use crate::download::error::FetchError;
use crate::download::provider::Provider;
use crate::download::ytdlp_errors::SIGN_IN_PHRASE;

pub const GREETING: &str = "Hi! Send me a song or artist name and I'll bring you the MP3 🎧";

pub const EMPTY_QUERY: &str = "Please send a song or artist name.";

pub const SEARCHING: &str = "🔎 Searching...";

pub const INTERNAL_ERROR: &str = "❌ Something went wrong on my side, please try again later.";

/// Status shown once a provider delivered the file
pub fn uploading(provider: Provider) -> String {
    format!("✅ Found on {} - uploading...", provider)
}

/// Text shown when no provider could deliver the track
pub fn fetch_failed(error: &FetchError) -> String {
    let text = match error {
        FetchError::EmptyQuery => EMPTY_QUERY.to_string(),
        FetchError::Exhausted { .. } if error.requires_auth() => formatdoc! {"
            ❌ {provider} needs cookies for this track (message: {phrase}).
            Export cookies.txt from your browser and put its content into the `{var}` environment variable.",
            provider = Provider::Secondary,
            phrase = SIGN_IN_PHRASE,
            var = COOKIES_ENV,
        },
        FetchError::Exhausted { primary, secondary } => format!(
            "❌ Download failed:\n{} error: {}\n{} error: {}",
            Provider::Primary,
            primary,
            Provider::Secondary,
            secondary
        ),
    };
    truncate_string_safe(&text, TELEGRAM_MESSAGE_LIMIT)
}

pub fn upload_failed(error: &AppError) -> String {
    let reason = match error {
        AppError::Upload(reason) => reason.clone(),
        other => other.to_string(),
    };
    truncate_string_safe(&format!("❌ Failed to send the file: {}", reason), TELEGRAM_MESSAGE_LIMIT)
}
