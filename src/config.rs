use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

use crate::utils::validation::validate_station_id;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
const DEFAULT_BASE_URL: &str = "https://israelrail.azurefd.net/rjpa-prod/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub http_port: u16,
    pub train: TrainApiConfig,
    pub cache_ttl: Duration,
    pub reminder: Option<ReminderConfig>,
    pub admin_chat_id: Option<i64>,
    pub home_station: String,
    pub work_station: String,
}

/// Settings for the remote timetable API.
#[derive(Debug, Clone)]
pub struct TrainApiConfig {
    pub api_key: String,
    pub user_agent: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ReminderConfig {
    pub chat_id: i64,
    pub message: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = required("TELEGRAM_BOT_TOKEN")?;
        let api_key = required("TRAIN_API_KEY")?;

        let port_str = optional("HTTP_PORT").unwrap_or_else(|| "3000".to_string());
        let http_port = port_str
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let timeout_secs: u64 = match optional("TRAIN_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow!("Invalid TRAIN_TIMEOUT_SECS"))?,
            None => 10,
        };
        if !(1..=120).contains(&timeout_secs) {
            return Err(anyhow!("TRAIN_TIMEOUT_SECS must be between 1 and 120"));
        }

        let ttl_secs: u64 = match optional("SCHEDULE_CACHE_TTL_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow!("Invalid SCHEDULE_CACHE_TTL_SECS"))?,
            None => 30 * 60,
        };
        if ttl_secs == 0 {
            return Err(anyhow!("SCHEDULE_CACHE_TTL_SECS must be positive"));
        }

        let reminder = match parse_chat_id("REMINDER_CHAT_ID")? {
            Some(chat_id) => Some(ReminderConfig {
                chat_id,
                message: optional("REMINDER_MESSAGE")
                    .unwrap_or_else(|| "need to use sibus".to_string()),
            }),
            None => None,
        };

        let home_station = optional("HOME_STATION").unwrap_or_else(|| "8700".to_string());
        let work_station = optional("WORK_STATION").unwrap_or_else(|| "4600".to_string());
        validate_station_id(&home_station).map_err(|e| anyhow!("Invalid HOME_STATION: {e}"))?;
        validate_station_id(&work_station).map_err(|e| anyhow!("Invalid WORK_STATION: {e}"))?;

        Ok(Config {
            telegram_bot_token: token,
            http_port,
            train: TrainApiConfig {
                api_key,
                user_agent: optional("TRAIN_USER_AGENT")
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                base_url: optional("TRAIN_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                timeout: Duration::from_secs(timeout_secs),
            },
            cache_ttl: Duration::from_secs(ttl_secs),
            reminder,
            admin_chat_id: parse_chat_id("ADMIN_CHAT_ID")?,
            home_station,
            work_station,
        })
    }
}

fn required(key: &str) -> Result<String> {
    optional(key).ok_or_else(|| anyhow!("{key} must be set"))
}

/// Reads a variable, treating blank values as unset.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Zero means "disabled", same as leaving the variable out.
fn parse_chat_id(key: &str) -> Result<Option<i64>> {
    match optional(key) {
        Some(raw) => {
            let id: i64 = raw.parse().map_err(|_| anyhow!("Invalid {key}"))?;
            Ok((id != 0).then_some(id))
        }
        None => Ok(None),
    }
}
