/// Timestamp parsing and formatting
pub mod datetime;
/// Emoji-tagged feedback texts
pub mod feedback;
/// Consistent log line helpers
pub mod logging;
/// Message chunking for the Telegram size limit
pub mod message;
/// Input validation
pub mod validation;
