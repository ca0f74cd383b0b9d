pub mod callback;
pub mod message;

use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::bot::conversation::RouteDialogue;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

pub struct BotHandler {
    pub dialogue: Arc<RouteDialogue>,
}

impl BotHandler {
    pub fn new(dialogue: Arc<RouteDialogue>) -> Self {
        Self { dialogue }
    }

    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        use teloxide::dispatching::UpdateFilterExt;

        let dialogue_cmd = self.dialogue.clone();
        let dialogue_text = self.dialogue.clone();
        let dialogue_callback = self.dialogue.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .branch(
                        dptree::entry()
                            .filter_command::<crate::bot::commands::Command>()
                            .endpoint(move |msg: Message, cmd| {
                                let dialogue = dialogue_cmd.clone();
                                async move { message::command_handler(msg, cmd, dialogue).await }
                            }),
                    )
                    .branch(dptree::endpoint(move |msg: Message| {
                        let dialogue = dialogue_text.clone();
                        async move { message::text_handler(msg, dialogue).await }
                    })),
            )
            .branch(Update::filter_callback_query().endpoint(move |q: CallbackQuery| {
                let dialogue = dialogue_callback.clone();
                async move { callback::callback_handler(q, dialogue).await }
            }))
    }
}
