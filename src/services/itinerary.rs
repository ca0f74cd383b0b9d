//! Wire model of the `searchTrainLuzForDateTime` response and the itineraries
//! parsed from it.

use serde::Deserialize;

use crate::error::BotError;

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    result: ScheduleResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleResult {
    #[serde(default)]
    travels: Vec<ApiTravel>,
    #[serde(rename = "numOfResultsToShow", default)]
    num_of_results_to_show: Option<usize>,
    #[serde(default)]
    start_from_index: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiTravel {
    #[serde(default)]
    trains: Vec<ApiTrain>,
}

// The API spells the origin field "orignStation"; newer payloads fix the typo.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTrain {
    #[serde(rename = "orignStation", alias = "originStation")]
    origin_station: StationCode,
    destination_station: StationCode,
    #[serde(default)]
    arrival_time: String,
    #[serde(default)]
    departure_time: String,
    #[serde(default)]
    origin_platform: Option<i64>,
    #[serde(default)]
    dest_platform: Option<i64>,
}

/// Station codes arrive as numbers, occasionally as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StationCode {
    Number(i64),
    Text(String),
}

impl From<StationCode> for String {
    fn from(code: StationCode) -> Self {
        match code {
            StationCode::Number(n) => n.to_string(),
            StationCode::Text(s) => s,
        }
    }
}

/// One train segment of a journey option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub origin: String,
    pub destination: String,
    pub origin_platform: Option<i64>,
    pub destination_platform: Option<i64>,
    /// Raw `YYYY-MM-DDTHH:MM:SS` string as received.
    pub departure: String,
    pub arrival: String,
}

/// One complete journey option: its legs in travel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelItinerary {
    pub legs: Vec<Leg>,
}

/// Parses a response body into itineraries in document order.
///
/// When the body carries `numOfResultsToShow`, only that window of travels
/// (starting at `startFromIndex`) is kept.
pub fn parse_itineraries(body: &str) -> Result<Vec<TravelItinerary>, BotError> {
    let response: ScheduleResponse = serde_json::from_str(body)?;
    let ScheduleResult {
        mut travels,
        num_of_results_to_show,
        start_from_index,
    } = response.result;

    if let Some(count) = num_of_results_to_show.filter(|&count| count > 0) {
        let start = start_from_index.unwrap_or(0).min(travels.len());
        let end = start.saturating_add(count).min(travels.len());
        travels = travels.drain(start..end).collect();
    }

    Ok(travels
        .into_iter()
        .map(|travel| TravelItinerary {
            legs: travel
                .trains
                .into_iter()
                .map(|train| Leg {
                    origin: train.origin_station.into(),
                    destination: train.destination_station.into(),
                    origin_platform: train.origin_platform,
                    destination_platform: train.dest_platform,
                    departure: train.departure_time,
                    arrival: train.arrival_time,
                })
                .collect(),
        })
        .collect())
}
