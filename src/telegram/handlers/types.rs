//! Handler types and dependencies

use std::sync::Arc;

use crate::core::config::Config;
use crate::download::fetch::AudioFetcher;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub config: Arc<Config>,
    pub fetcher: Arc<AudioFetcher>,
    /// Used to accept `/start@<bot_username>` in groups
    pub bot_username: String,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(config: Arc<Config>, fetcher: Arc<AudioFetcher>, bot_username: String) -> Self {
        Self {
            config,
            fetcher,
            bot_username,
        }
    }
}
