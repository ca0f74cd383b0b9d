/// Slash commands understood by the bot
pub mod commands;
/// Route selection dialogue state machine
pub mod conversation;
/// Outbound messaging abstraction and its Telegram implementation
pub mod gateway;
/// Update routing from Telegram to the dialogue
pub mod handlers;
