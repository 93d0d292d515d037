//! Classification of inbound text messages

use teloxide::utils::command::BotCommands;

use crate::telegram::bot::Command;

/// What an inbound text message asks for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Incoming {
    /// `/start`, answered with the greeting
    Start,
    /// Free text, the whole body is the song query
    Query(String),
}

impl Incoming {
    /// Classifies a message text.
    ///
    /// Returns `None` for slash commands other than `/start` (including
    /// `/start` addressed to another bot); those are left unhandled.
    pub fn classify(text: &str, bot_username: &str) -> Option<Self> {
        if let Ok(Command::Start) = Command::parse(text, bot_username) {
            return Some(Incoming::Start);
        }
        if text.trim_start().starts_with('/') {
            return None;
        }
        Some(Incoming::Query(text.to_string()))
    }
}
