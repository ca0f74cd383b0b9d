//! # Rail Schedule Bot Main Entry Point
//!
//! Initializes logging, loads configuration, wires the station directory,
//! schedule cache and dialogue together, starts the reminder service and
//! runs the Telegram bot next to the health server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rail_schedule_bot::bot::conversation::{PhaseStorage, QuickRoutes, RouteDialogue};
use rail_schedule_bot::bot::gateway::{MessagingGateway, TelegramGateway};
use rail_schedule_bot::bot::handlers::BotHandler;
use rail_schedule_bot::config::Config;
use rail_schedule_bot::services::health::HealthService;
use rail_schedule_bot::services::reminder::ReminderService;
use rail_schedule_bot::services::schedule::ScheduleFetcher;
use rail_schedule_bot::services::schedule_cache::ScheduleCache;
use rail_schedule_bot::stations::StationDirectory;
use rail_schedule_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rail_schedule_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Rail Schedule Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - API: {}, cache TTL: {}s, HTTP Port: {}",
        config.train.base_url,
        config.cache_ttl.as_secs(),
        config.http_port
    );

    let stations = Arc::new(StationDirectory::load());
    info!("Loaded {} stations", stations.len());

    let cache = Arc::new(ScheduleCache::new(config.cache_ttl));
    let fetcher = Arc::new(
        ScheduleFetcher::new(config.train.clone(), cache.clone(), stations.clone())
            .map_err(|e| anyhow::anyhow!("Failed to build schedule fetcher: {}", e))?,
    );

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let gateway: Arc<dyn MessagingGateway> = Arc::new(TelegramGateway::new(bot.clone()));
    let quick_routes = QuickRoutes {
        home: config.home_station.clone(),
        work: config.work_station.clone(),
    };
    let dialogue = Arc::new(RouteDialogue::new(
        PhaseStorage::new(),
        fetcher,
        gateway.clone(),
        quick_routes,
    ));
    let handler = BotHandler::new(dialogue);
    info!("Telegram bot initialized successfully");

    if let Some(admin_chat_id) = config.admin_chat_id {
        let notice = format!("🚆 Rail Schedule Bot v{} started", env!("CARGO_PKG_VERSION"));
        if let Err(e) = gateway.send_text(admin_chat_id, &notice).await {
            tracing::warn!("Failed to send startup notice to {}: {}", admin_chat_id, e);
        }
    }

    // Reminder service is optional
    let mut reminder_service = match config.reminder.clone() {
        Some(reminder_config) => {
            info!("Initializing reminder service...");
            let mut service = ReminderService::new(gateway.clone(), reminder_config)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create reminder service: {}", e))?;
            if let Err(e) = service.start().await {
                tracing::error!("Failed to start reminder service: {}", e);
            }
            Some(service)
        }
        None => {
            log_system_event("reminder_disabled", Some("REMINDER_CHAT_ID not set"));
            None
        }
    };

    // Initialize health service
    let health_service = HealthService::new(cache, stations);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    if let Some(service) = reminder_service.as_mut() {
        if let Err(e) = service.stop().await {
            tracing::warn!("Error stopping reminder service: {}", e);
        }
    }

    log_system_event("shutdown", None);
    Ok(())
}
