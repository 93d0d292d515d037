//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command list registration

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config::{self, Config};

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Send a song or artist name to get an MP3. Commands:")]
pub enum Command {
    #[command(description = "show the greeting")]
    Start,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token or the HTTP client could not be built
pub fn create_bot(app_config: &Config) -> anyhow::Result<Bot> {
    let token = app_config.require_token()?;
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token.expose_secret().to_string(), client);

    // Local Bot API server, if configured
    let bot = match &app_config.bot_api_url {
        Some(url) => {
            log::info!("Using custom Bot API URL: {}", url);
            bot.set_api_url(url.clone())
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_list() {
        let commands = Command::bot_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].command.trim_start_matches('/'), "start");
    }

    #[test]
    fn test_parse_start() {
        assert_eq!(Command::parse("/start", "tunefetch_bot").ok(), Some(Command::Start));
        assert_eq!(Command::parse("/start@tunefetch_bot", "tunefetch_bot").ok(), Some(Command::Start));
        assert!(Command::parse("/start@other_bot", "tunefetch_bot").is_err());
        assert!(Command::parse("/help", "tunefetch_bot").is_err());
    }

    #[test]
    fn test_create_bot_requires_token() {
        let app_config = Config::from_lookup(|_| None).unwrap();
        assert!(create_bot(&app_config).is_err());
    }
}
