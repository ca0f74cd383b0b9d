use chrono::Local;
use reqwest::header::USER_AGENT;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::config::TrainApiConfig;
use crate::error::BotError;
use crate::services::itinerary::{parse_itineraries, Leg, TravelItinerary};
use crate::services::schedule_cache::ScheduleCache;
use crate::stations::StationDirectory;
use crate::utils::datetime::display_leg_time;
use crate::utils::message::{split_with_part_markers, MAX_CHUNK_LEN};

/// Legs shown per schedule, counted across all itineraries.
pub const MAX_LEGS: usize = 5;

const TIMETABLE_PATH: &str = "timetable/searchTrainLuzForDateTime";

/// Fetches, formats and caches timetables from the rail API.
pub struct ScheduleFetcher {
    client: reqwest::Client,
    config: TrainApiConfig,
    cache: Arc<ScheduleCache>,
    stations: Arc<StationDirectory>,
}

impl ScheduleFetcher {
    pub fn new(
        config: TrainApiConfig,
        cache: Arc<ScheduleCache>,
        stations: Arc<StationDirectory>,
    ) -> Result<Self, BotError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            cache,
            stations,
        })
    }

    pub fn stations(&self) -> &StationDirectory {
        &self.stations
    }

    /// Returns the schedule for `origin` → `destination` as message chunks.
    ///
    /// Served from the cache when `user` asked for the same route within the
    /// TTL; otherwise fetched from the API. Failures are never cached.
    pub async fn get_schedule(
        &self,
        user: &str,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<String>, BotError> {
        if let Some(chunks) = self.cache.get(user, origin, destination) {
            tracing::debug!("Schedule cache hit for {} -> {} (user {})", origin, destination, user);
            return Ok(chunks);
        }

        tracing::info!("Fetching schedule {} -> {} for user {}", origin, destination, user);
        let body = self.fetch_raw(origin, destination).await?;
        let itineraries = parse_itineraries(&body)?;

        let text = format_schedule(&itineraries, &self.stations);
        let chunks = split_with_part_markers(&text, MAX_CHUNK_LEN);

        self.cache.put(user, origin, destination, chunks.clone());
        Ok(chunks)
    }

    async fn fetch_raw(&self, origin: &str, destination: &str) -> Result<String, BotError> {
        let now = Local::now();
        let date = now.format("%Y-%m-%d").to_string();
        let hour = now.format("%H:%M:%S").to_string();
        let url = format!("{}/{}", self.config.base_url, TIMETABLE_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("fromStation", origin),
                ("toStation", destination),
                ("date", date.as_str()),
                ("hour", hour.as_str()),
                ("scheduleType", "2"),
                ("systemType", "1"),
                ("languageId", "Hebrew"),
            ])
            .header(USER_AGENT, &self.config.user_agent)
            .header("ocp-apim-subscription-key", &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Fetch(format!("unexpected status code: {status}")));
        }

        Ok(response.text().await?)
    }
}

/// Renders at most [`MAX_LEGS`] legs, in itinerary order then leg order.
pub fn format_schedule(itineraries: &[TravelItinerary], stations: &StationDirectory) -> String {
    let mut out = String::new();
    let mut emitted = 0;

    for (i, itinerary) in itineraries.iter().enumerate() {
        if emitted >= MAX_LEGS {
            break;
        }
        let _ = writeln!(out, "🚆 {}:", i + 1);
        for (j, leg) in itinerary.legs.iter().enumerate() {
            if emitted >= MAX_LEGS {
                break;
            }
            write_leg(&mut out, j + 1, leg, stations);
            emitted += 1;
        }
        out.push('\n');
    }

    if emitted == 0 {
        return "🚆 לא נמצאו רכבות במסלול זה.".to_string();
    }
    out
}

fn write_leg(out: &mut String, index: usize, leg: &Leg, stations: &StationDirectory) {
    let _ = writeln!(out, "  🚂 {index}:");
    let _ = writeln!(
        out,
        "    עליה: {} (רציף {})",
        stations.display_name(&leg.origin),
        platform(leg.origin_platform)
    );
    let _ = writeln!(out, "    זמן יציאת הרכבת: {}", display_leg_time(&leg.departure));
    let _ = writeln!(
        out,
        "    אל: {} (רציף {})",
        stations.display_name(&leg.destination),
        platform(leg.destination_platform)
    );
    let _ = writeln!(out, "    זמן הגעה: {}", display_leg_time(&leg.arrival));
}

fn platform(number: Option<i64>) -> String {
    number.map_or_else(|| "?".to_string(), |n| n.to_string())
}
