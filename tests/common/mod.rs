#![allow(dead_code, clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;

use rail_schedule_bot::bot::conversation::{PhaseStorage, QuickRoutes, RouteDialogue};
use rail_schedule_bot::bot::gateway::{Choice, GatewayFuture, MessagingGateway};
use rail_schedule_bot::config::TrainApiConfig;
use rail_schedule_bot::error::BotError;
use rail_schedule_bot::services::schedule::ScheduleFetcher;
use rail_schedule_bot::services::schedule_cache::ScheduleCache;
use rail_schedule_bot::stations::StationDirectory;

/// Everything the code under test pushed through the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Choices { chat_id: i64, text: String, rows: Vec<Vec<Choice>> },
    Ack(String),
}

#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<Sent>>,
    fail_acks: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_acks() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_acks: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { chat_id: c, text } if c == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_choices(&self, chat_id: i64) -> Option<(String, Vec<Vec<Choice>>)> {
        self.sent().into_iter().rev().find_map(|s| match s {
            Sent::Choices { chat_id: c, text, rows } if c == chat_id => Some((text, rows)),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl MessagingGateway for RecordingGateway {
    fn send_text<'a>(&'a self, chat_id: i64, text: &'a str) -> GatewayFuture<'a> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(Sent::Text {
                chat_id,
                text: text.to_string(),
            });
            Ok(())
        })
    }

    fn send_choices<'a>(
        &'a self,
        chat_id: i64,
        text: &'a str,
        rows: &'a [Vec<Choice>],
    ) -> GatewayFuture<'a> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(Sent::Choices {
                chat_id,
                text: text.to_string(),
                rows: rows.to_vec(),
            });
            Ok(())
        })
    }

    fn acknowledge<'a>(&'a self, callback_id: &'a str) -> GatewayFuture<'a> {
        Box::pin(async move {
            self.sent
                .lock()
                .unwrap()
                .push(Sent::Ack(callback_id.to_string()));
            if self.fail_acks {
                return Err(BotError::Gateway("callback expired".to_string()));
            }
            Ok(())
        })
    }
}

/// Canned timetable API served on a random local port.
#[derive(Clone)]
pub struct FakeRailApi {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

#[derive(Clone)]
struct ApiState {
    status: StatusCode,
    body: String,
    hits: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn timetable(
    State(state): State<ApiState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.queries.lock().unwrap().push(params);
    (state.status, state.body.clone())
}

impl FakeRailApi {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let state = ApiState {
            status,
            body: body.into(),
            hits: hits.clone(),
            queries: queries.clone(),
        };
        let app = Router::new()
            .route("/timetable/searchTrainLuzForDateTime", get(timetable))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            queries,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.queries.lock().unwrap().last().cloned()
    }

    pub fn api_config(&self) -> TrainApiConfig {
        TrainApiConfig {
            api_key: "test-key".to_string(),
            user_agent: "rail-schedule-bot-tests".to_string(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// JSON body with one single-leg travel per departure, Savidor → HaShalom.
pub fn timetable_body(departures: &[&str]) -> String {
    let travels: Vec<String> = departures
        .iter()
        .map(|departure| {
            format!(
                r#"{{"trains": [{{"orignStation": 3700, "destinationStation": 4600,
                    "departureTime": "{departure}", "arrivalTime": "{departure}",
                    "originPlatform": 1, "destPlatform": 2}}]}}"#
            )
        })
        .collect();
    format!(r#"{{"result": {{"travels": [{}]}}}}"#, travels.join(","))
}

pub fn fetcher_for(api: &FakeRailApi) -> (Arc<ScheduleFetcher>, Arc<ScheduleCache>) {
    let cache = Arc::new(ScheduleCache::new(Duration::from_secs(60)));
    let fetcher = ScheduleFetcher::new(
        api.api_config(),
        cache.clone(),
        Arc::new(StationDirectory::load()),
    )
    .unwrap();
    (Arc::new(fetcher), cache)
}

pub fn quick_routes() -> QuickRoutes {
    QuickRoutes {
        home: "8700".to_string(),
        work: "4600".to_string(),
    }
}

pub fn dialogue_for(
    api: &FakeRailApi,
) -> (RouteDialogue, Arc<RecordingGateway>, Arc<ScheduleCache>) {
    let gateway = Arc::new(RecordingGateway::new());
    let (fetcher, cache) = fetcher_for(api);
    let dialogue = RouteDialogue::new(PhaseStorage::new(), fetcher, gateway.clone(), quick_routes());
    (dialogue, gateway, cache)
}
