use {
    anyhow::Result,
    async_trait::async_trait,
    teloxide::{
        prelude::*,
        types::{ChatAction, ChatId},
    },
};

use {banter_channels::ChannelOutbound, banter_common::ConversationId};

use crate::error::Error;

/// Outbound message sender for Telegram.
pub struct TelegramOutbound {
    bot: Bot,
}

impl TelegramOutbound {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn chat_id(to: &ConversationId) -> crate::error::Result<ChatId> {
        let raw: i64 = to
            .as_str()
            .parse()
            .map_err(|_| Error::message(format!("not a telegram chat id: {to}")))?;
        Ok(ChatId(raw))
    }
}

#[async_trait]
impl ChannelOutbound for TelegramOutbound {
    async fn send_text(&self, to: &ConversationId, text: &str) -> Result<()> {
        self.bot.send_message(Self::chat_id(to)?, text).await?;
        Ok(())
    }

    async fn send_typing(&self, to: &ConversationId) -> Result<()> {
        self.bot
            .send_chat_action(Self::chat_id(to)?, ChatAction::Typing)
            .await?;
        Ok(())
    }
}
