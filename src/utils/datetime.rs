use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::error::BotError;

const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Extracts `HH:MM:SS` from an API timestamp such as `2025-01-27T08:05:00`.
pub fn parse_leg_time(raw: &str) -> Result<String, BotError> {
    NaiveDateTime::parse_from_str(raw.trim(), API_TIMESTAMP_FORMAT)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .map_err(|_| BotError::TimeParse {
            raw: raw.to_string(),
        })
}

/// Leg time for display; unparsable input is shown as received.
pub fn display_leg_time(raw: &str) -> String {
    parse_leg_time(raw).unwrap_or_else(|e| {
        tracing::debug!("{}", e);
        e.user_message()
    })
}

/// Weekday, date and time, e.g. `Mon Jan 27 08:00:00`.
pub fn format_reminder_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%a %b %-d %H:%M:%S").to_string()
}
