//! Request pipeline: status updates, fetch, delivery and cleanup for one query
//!
//! The chat side is abstracted behind [`ChatSession`] so the same pipeline
//! drives Telegram in production and a recording fake in tests.

use async_trait::async_trait;

use crate::core::config::Config;
use crate::core::error::AppResult;
use crate::download::fetch::{AudioFetcher, DownloadResult};
use crate::download::provider::Provider;
use crate::download::scope::RequestScope;
use crate::messages;

/// The conversation a query arrived in
#[async_trait]
pub trait ChatSession: Send {
    /// Sends a plain reply to the user's message
    async fn reply(&mut self, text: &str) -> AppResult<()>;

    /// Shows `text` in the request's status message, creating it on first use
    async fn set_status(&mut self, text: &str) -> AppResult<()>;

    /// Uploads the track as an audio attachment
    async fn send_audio(&mut self, track: &DownloadResult) -> AppResult<()>;
}

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Blank query, the user was asked for a song name
    Prompted,
    /// The audio was uploaded
    Delivered(Provider),
    /// Both providers failed, the user saw the reason
    FetchFailed,
    /// The file was downloaded but could not be sent
    UploadFailed,
}

/// Handles one song query end to end.
///
/// The request's files are removed before returning, on every path.
///
/// # Errors
/// Only chat-side failures while reporting a status are returned; fetch and
/// upload failures are shown to the user and reported through the outcome.
pub async fn process_query<S>(
    fetcher: &AudioFetcher,
    config: &Config,
    query: &str,
    session: &mut S,
) -> AppResult<RequestOutcome>
where
    S: ChatSession + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        session.reply(messages::EMPTY_QUERY).await?;
        return Ok(RequestOutcome::Prompted);
    }

    session.set_status(messages::SEARCHING).await?;

    let mut scope = match RequestScope::open(&config.download_dir, config.cookies_content.as_ref()) {
        Ok(scope) => scope,
        Err(e) => {
            log::error!("Failed to prepare request directory in {}: {}", config.download_dir.display(), e);
            session.set_status(messages::INTERNAL_ERROR).await?;
            return Err(e.into());
        }
    };

    let outcome = deliver(fetcher, query, &scope, session).await;
    scope.cleanup();
    outcome
}

async fn deliver<S>(
    fetcher: &AudioFetcher,
    query: &str,
    scope: &RequestScope,
    session: &mut S,
) -> AppResult<RequestOutcome>
where
    S: ChatSession + ?Sized,
{
    let track = match fetcher.fetch_audio(query, scope.dir(), scope.cookie_file()).await {
        Ok(track) => track,
        Err(e) => {
            log::error!("Request {} failed: {}", scope.id(), e);
            session.set_status(&messages::fetch_failed(&e)).await?;
            return Ok(RequestOutcome::FetchFailed);
        }
    };

    session.set_status(&messages::uploading(track.provider)).await?;

    match session.send_audio(&track).await {
        Ok(()) => {
            log::info!("📤 Request {} delivered {:?} from {}", scope.id(), track.title, track.provider);
            Ok(RequestOutcome::Delivered(track.provider))
        }
        Err(e) => {
            log::error!("Request {} upload failed: {}", scope.id(), e);
            session.set_status(&messages::upload_failed(&e)).await?;
            Ok(RequestOutcome::UploadFailed)
        }
    }
}
