use std::sync::Arc;
use teloxide::prelude::*;

use super::HandlerResult;
use crate::bot::conversation::RouteDialogue;

pub async fn callback_handler(q: CallbackQuery, dialogue: Arc<RouteDialogue>) -> HandlerResult {
    let user_id = q.from.id.0;
    let username = q.from.username.as_ref().map_or("unknown", |v| v);
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat.id.0) else {
        tracing::warn!("Callback from user {} without a message, ignoring", user_id);
        dialogue.gateway().acknowledge(&q.id).await?;
        return Ok(());
    };
    let data = q.data.as_deref().unwrap_or_default();

    tracing::info!(
        "Callback received: '{}' from user {} ({}) in chat {}",
        data, username, user_id, chat_id
    );

    dialogue
        .handle_callback(chat_id, &user_id.to_string(), &q.id, data)
        .await?;
    Ok(())
}
