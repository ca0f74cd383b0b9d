use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use super::HandlerResult;
use crate::bot::commands::Command;
use crate::bot::conversation::{Phase, RouteDialogue};
use crate::utils::feedback::FeedbackType;
use crate::utils::logging::{log_command_error, log_command_start};

pub async fn command_handler(
    msg: Message,
    cmd: Command,
    dialogue: Arc<RouteDialogue>,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;
    let (user, user_id) = msg
        .from()
        .map(|u| (u.username.clone().unwrap_or_else(|| "unknown".to_string()), u.id.0))
        .unwrap_or_else(|| ("unknown".to_string(), 0));
    log_command_start(&format!("{cmd:?}"), &user, user_id, chat_id);

    let result = match cmd {
        Command::Help => {
            dialogue
                .gateway()
                .send_text(chat_id, &Command::descriptions().to_string())
                .await?;
            Ok(dialogue.phase(chat_id).await)
        }
        Command::Start => {
            dialogue
                .gateway()
                .send_text(
                    chat_id,
                    &FeedbackType::Train.message(
                        "ברוכים הבאים! בחרו מסלול כדי לקבל את הרכבות הקרובות.\nUse /help to see all commands.",
                    ),
                )
                .await?;
            dialogue.show_menu(chat_id).await
        }
        Command::Train => dialogue.show_menu(chat_id).await,
        Command::Cancel => {
            dialogue.reset(chat_id).await;
            dialogue
                .gateway()
                .send_text(chat_id, &FeedbackType::Success.message("בחירת המסלול בוטלה."))
                .await
                .map(|()| Phase::Idle)
        }
    };

    if let Err(e) = &result {
        log_command_error(&format!("{cmd:?}"), chat_id, &e.to_string());
    }
    result?;
    Ok(())
}

/// Plain text: the train emoji opens the menu outside a dialogue, anything
/// else is fed to the dialogue.
pub async fn text_handler(msg: Message, dialogue: Arc<RouteDialogue>) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id.0;
    tracing::info!("Text received in chat {}: '{}'", chat_id, text);

    let phase = dialogue.phase(chat_id).await;
    let awaiting_input = !matches!(phase, Phase::Idle | Phase::Ready { .. });
    if !awaiting_input && text.trim() == FeedbackType::Train.emoji() {
        dialogue.show_menu(chat_id).await?;
    } else {
        dialogue.handle_text(chat_id, text).await?;
    }
    Ok(())
}
