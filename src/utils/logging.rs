use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: i64) {
    info!("CMD_START: {} by {}({}) in chat {}", command, user, user_id, chat_id);
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, chat_id: i64, error: &str) {
    error!("CMD_ERROR: {} in chat {} - {}", command, chat_id, error);
}

/// Logs a dialogue phase change
pub fn log_dialogue_transition(chat_id: i64, event: &str, from: &str, to: &str) {
    if from == to {
        debug!("DIALOGUE: chat {} stays in {} after {}", chat_id, from, event);
    } else {
        info!("DIALOGUE: chat {} {} -> {} on {}", chat_id, from, to, event);
    }
}

/// Logs a recoverable dialogue error that was reported to the user
pub fn log_dialogue_error(chat_id: i64, event: &str, error: &str) {
    warn!("DIALOGUE_ERROR: chat {} on {} - {}", chat_id, event, error);
}

/// Logs schedule fetch failures with consistent format
pub fn log_fetch_error(origin: &str, destination: &str, error: &str) {
    error!("FETCH_ERROR: {} -> {} failed: {}", origin, destination, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
