use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::services::schedule_cache::ScheduleCache;
use crate::stations::StationDirectory;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub cache: CacheHealth,
    pub stations: usize,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheHealth {
    pub entries: usize,
    pub ttl_seconds: u64,
}

/// Probes that take longer than this answer 408.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ScheduleCache>,
    pub stations: Arc<StationDirectory>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(cache: Arc<ScheduleCache>, stations: Arc<StationDirectory>) -> Self {
        let state = AppState {
            cache,
            stations,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
            )
            .with_state(state);

        Self { router }
    }
}

/// Full status report. Unhealthy reports keep their body but answer 503.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let now = Utc::now();
    let healthy = !state.stations.is_empty();

    let report = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: now,
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: CacheHealth {
            entries: state.cache.len(),
            ttl_seconds: state.cache.ttl().as_secs(),
        },
        stations: state.stations.len(),
        uptime_seconds: now.signed_duration_since(state.start_time).num_seconds().max(0) as u64,
    };

    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    // Without stations no route can be chosen
    if state.stations.is_empty() {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    } else {
        Ok(Json("ready"))
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}
