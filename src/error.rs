use thiserror::Error;

use crate::utils::feedback::FeedbackType;

/// Errors produced by the schedule lookup pipeline.
///
/// Everything here is recoverable: the dialogue turns the first four variants
/// into a message for the user and carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BotError {
    #[error("No station matches {query:?}")]
    LookupMiss { query: String },

    #[error("Event {event} is not valid in phase {phase}")]
    InvalidState { phase: String, event: String },

    #[error("Failed to fetch schedule: {0}")]
    Fetch(String),

    #[error("Unparsable timestamp {raw:?}")]
    TimeParse { raw: String },

    #[error("Messaging gateway error: {0}")]
    Gateway(String),
}

impl BotError {
    /// Text shown to the user when this error ends a dialogue step.
    pub fn user_message(&self) -> String {
        match self {
            BotError::LookupMiss { .. } => FeedbackType::Warning
                .message("לא נמצאו תחנות תואמות. נסה להקליד אותיות אחרות."),
            BotError::InvalidState { .. } => FeedbackType::Warning.message(&format!(
                "מצב לא ידוע. אנא בחר אופציה או הקלד {}",
                FeedbackType::Train.emoji()
            )),
            BotError::Fetch(_) => FeedbackType::Warning
                .message("לא ניתן לקבל את לוח הזמנים כרגע. אנא נסה שוב."),
            BotError::TimeParse { raw } => raw.clone(),
            BotError::Gateway(_) => FeedbackType::Warning.message("שגיאה בשליחת ההודעה."),
        }
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Fetch(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Fetch(format!("malformed response body: {err}"))
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Gateway(err.to_string())
    }
}
