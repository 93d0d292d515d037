//! Dispatcher schema

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::download::pipeline::{process_query, RequestOutcome};
use crate::messages;
use crate::telegram::router::Incoming;
use crate::telegram::session::TelegramSession;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Text messages are classified into [`Incoming`]; `/start` gets the
/// greeting, free text runs the download pipeline. Everything else falls
/// through to the dispatcher's default handler.
///
/// # Arguments
/// * `deps` - Handler dependencies (configuration, fetcher, bot username)
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let bot_username = deps.bot_username.clone();

    Update::filter_message()
        .filter_map(move |msg: Message| msg.text().and_then(|text| Incoming::classify(text, &bot_username)))
        .branch(dptree::case![Incoming::Start].endpoint(|bot: Bot, msg: Message| async move {
            log::info!("/start from chat {}", msg.chat.id);
            bot.send_message(msg.chat.id, messages::GREETING).await?;
            Ok::<(), HandlerError>(())
        }))
        .branch(
            dptree::case![Incoming::Query(query)].endpoint(move |bot: Bot, msg: Message, query: String| {
                let deps = deps.clone();
                async move { handle_query(bot, msg, query, deps).await }
            }),
        )
}

async fn handle_query(bot: Bot, msg: Message, query: String, deps: HandlerDeps) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;
    log::info!("🎵 Query from chat {}: {:?}", chat_id, query);

    let mut session = TelegramSession::new(bot, chat_id, msg.id);
    match process_query(&deps.fetcher, &deps.config, &query, &mut session).await {
        Ok(RequestOutcome::Delivered(provider)) => {
            log::info!("Chat {} served from {}", chat_id, provider);
            Ok(())
        }
        Ok(outcome) => {
            log::info!("Chat {} request ended: {:?}", chat_id, outcome);
            Ok(())
        }
        Err(e) => {
            log::error!("❌ Request from chat {} failed: {}", chat_id, e);
            Err(e.into())
        }
    }
}
