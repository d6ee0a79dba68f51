use async_trait::async_trait;
use teloxide::{
    Bot,
    payloads::{EditMessageTextSetters, SendMessageSetters},
    prelude::Requester,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode},
};

use super::{Choice, MessageChannel, MessageRef};
use crate::errors::AppError;

pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn build_markup(choices: Vec<Vec<Choice>>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(choices.into_iter().map(|row| {
        row.into_iter()
            .map(|choice| InlineKeyboardButton::callback(choice.label, choice.data))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl MessageChannel for TelegramChannel {
    async fn send(
        &self,
        user_id: i64,
        text: &str,
        choices: Option<Vec<Vec<Choice>>>,
    ) -> Result<MessageRef, AppError> {
        let mut request = self
            .bot
            .send_message(ChatId(user_id), text)
            .parse_mode(ParseMode::Html);

        if let Some(choices) = choices {
            request = request.reply_markup(build_markup(choices));
        }

        let message = request.await?;

        Ok(MessageRef {
            chat_id: message.chat.id.0,
            message_id: message.id.0,
        })
    }

    async fn edit(
        &self,
        target: MessageRef,
        text: &str,
        choices: Option<Vec<Vec<Choice>>>,
    ) -> Result<(), AppError> {
        let mut request = self
            .bot
            .edit_message_text(ChatId(target.chat_id), MessageId(target.message_id), text)
            .parse_mode(ParseMode::Html);

        if let Some(choices) = choices {
            request = request.reply_markup(build_markup(choices));
        }

        request.await?;

        Ok(())
    }
}
