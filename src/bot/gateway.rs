//! Outbound messaging seam between the dialogue logic and the chat transport.

use std::future::Future;
use std::pin::Pin;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::error::BotError;

pub type GatewayFuture<'a> = Pin<Box<dyn Future<Output = Result<(), BotError>> + Send + 'a>>;

/// A labelled button carrying an opaque callback payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub data: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Capabilities the core needs from the chat transport.
pub trait MessagingGateway: Send + Sync {
    fn send_text<'a>(&'a self, chat_id: i64, text: &'a str) -> GatewayFuture<'a>;

    /// Sends `text` with `rows` of selectable options attached.
    fn send_choices<'a>(
        &'a self,
        chat_id: i64,
        text: &'a str,
        rows: &'a [Vec<Choice>],
    ) -> GatewayFuture<'a>;

    fn acknowledge<'a>(&'a self, callback_id: &'a str) -> GatewayFuture<'a>;
}

/// [`MessagingGateway`] backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl MessagingGateway for TelegramGateway {
    fn send_text<'a>(&'a self, chat_id: i64, text: &'a str) -> GatewayFuture<'a> {
        Box::pin(async move {
            self.bot.send_message(ChatId(chat_id), text).await?;
            Ok(())
        })
    }

    fn send_choices<'a>(
        &'a self,
        chat_id: i64,
        text: &'a str,
        rows: &'a [Vec<Choice>],
    ) -> GatewayFuture<'a> {
        Box::pin(async move {
            let keyboard = InlineKeyboardMarkup::new(rows.iter().map(|row| {
                row.iter()
                    .map(|choice| {
                        InlineKeyboardButton::callback(choice.label.clone(), choice.data.clone())
                    })
                    .collect::<Vec<_>>()
            }));
            self.bot
                .send_message(ChatId(chat_id), text)
                .reply_markup(keyboard)
                .await?;
            Ok(())
        })
    }

    fn acknowledge<'a>(&'a self, callback_id: &'a str) -> GatewayFuture<'a> {
        Box::pin(async move {
            self.bot.answer_callback_query(callback_id).await?;
            Ok(())
        })
    }
}
