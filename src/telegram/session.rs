//! Telegram implementation of the chat side of a request

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ReplyParameters};
use teloxide::{ApiError, RequestError};

use crate::core::error::{AppError, AppResult};
use crate::download::fetch::DownloadResult;
use crate::download::pipeline::ChatSession;

/// One query message and the status message the bot keeps editing for it
pub struct TelegramSession {
    bot: Bot,
    chat_id: ChatId,
    request_msg: MessageId,
    status_msg: Option<MessageId>,
}

impl TelegramSession {
    pub fn new(bot: Bot, chat_id: ChatId, request_msg: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            request_msg,
            status_msg: None,
        }
    }
}

#[async_trait]
impl ChatSession for TelegramSession {
    async fn reply(&mut self, text: &str) -> AppResult<()> {
        self.bot
            .send_message(self.chat_id, text)
            .reply_parameters(ReplyParameters::new(self.request_msg))
            .await?;
        Ok(())
    }

    async fn set_status(&mut self, text: &str) -> AppResult<()> {
        match self.status_msg {
            Some(status_msg) => match self.bot.edit_message_text(self.chat_id, status_msg, text).await {
                Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => {}
                Err(e) => return Err(e.into()),
            },
            None => {
                let sent = self
                    .bot
                    .send_message(self.chat_id, text)
                    .reply_parameters(ReplyParameters::new(self.request_msg))
                    .await?;
                self.status_msg = Some(sent.id);
            }
        }
        Ok(())
    }

    async fn send_audio(&mut self, track: &DownloadResult) -> AppResult<()> {
        let mut request = self
            .bot
            .send_audio(self.chat_id, InputFile::file(track.path.clone()))
            .title(track.title.clone())
            .reply_parameters(ReplyParameters::new(self.request_msg));
        if let Some(performer) = &track.performer {
            request = request.performer(performer.clone());
        }

        request.await.map_err(|e| {
            log::error!("Failed to send audio {} to chat {}: {}", track.path.display(), self.chat_id, e);
            AppError::Upload(e.to_string())
        })?;
        Ok(())
    }
}
