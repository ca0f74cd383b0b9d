//! Per-chat route selection dialogue.
//!
//! A chat walks `Idle → AwaitingOrigin → AwaitingOriginSelection →
//! AwaitingDestination → AwaitingDestinationSelection → Ready` and returns to
//! `Idle` once the schedule has been delivered. Pending stations live inside
//! the phase itself, so a phase can never exist without the stations it needs.

use std::fmt;
use std::sync::Arc;

use teloxide::dispatching::dialogue::{InMemStorage, InMemStorageError, Storage};
use teloxide::types::ChatId;

use crate::bot::gateway::{Choice, MessagingGateway};
use crate::error::BotError;
use crate::services::schedule::ScheduleFetcher;
use crate::utils::feedback::FeedbackType;
use crate::utils::logging::{log_dialogue_error, log_dialogue_transition, log_fetch_error};
use crate::utils::validation::validate_station_query;

/// Most station buttons offered for one query.
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingOrigin,
    AwaitingOriginSelection,
    AwaitingDestination {
        origin: String,
    },
    AwaitingDestinationSelection {
        origin: String,
    },
    Ready {
        origin: String,
        destination: String,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::AwaitingOrigin => "AwaitingOrigin",
            Phase::AwaitingOriginSelection => "AwaitingOriginSelection",
            Phase::AwaitingDestination { .. } => "AwaitingDestination",
            Phase::AwaitingDestinationSelection { .. } => "AwaitingDestinationSelection",
            Phase::Ready { .. } => "Ready",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed routes that skip the dialogue entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRoute {
    Home,
    Work,
}

/// Station pair behind the home and work shortcuts.
#[derive(Debug, Clone)]
pub struct QuickRoutes {
    /// Station the user lives near.
    pub home: String,
    /// Station the user works near.
    pub work: String,
}

impl QuickRoutes {
    /// `(origin, destination)` for a shortcut: "home" rides from work to
    /// home, "work" rides the other way.
    pub fn stations(&self, route: QuickRoute) -> (&str, &str) {
        match route {
            QuickRoute::Home => (self.work.as_str(), self.home.as_str()),
            QuickRoute::Work => (self.home.as_str(), self.work.as_str()),
        }
    }
}

/// Decoded callback payload of an inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Quick(QuickRoute),
    OtherRoute,
    Station(String),
    Search,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "route:home" => Some(CallbackAction::Quick(QuickRoute::Home)),
            "route:work" => Some(CallbackAction::Quick(QuickRoute::Work)),
            "route:other" => Some(CallbackAction::OtherRoute),
            "search" => Some(CallbackAction::Search),
            _ => data
                .strip_prefix("station:")
                .filter(|id| !id.is_empty())
                .map(|id| CallbackAction::Station(id.to_string())),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Quick(QuickRoute::Home) => "route:home".to_string(),
            CallbackAction::Quick(QuickRoute::Work) => "route:work".to_string(),
            CallbackAction::OtherRoute => "route:other".to_string(),
            CallbackAction::Station(id) => format!("station:{id}"),
            CallbackAction::Search => "search".to_string(),
        }
    }
}

/// Per-chat phase storage. Chats never share an entry.
pub type PhaseStorage = InMemStorage<Phase>;

/// Phase of `chat_id`, `Idle` when the chat has no entry.
pub async fn load_phase(storage: &Arc<PhaseStorage>, chat_id: i64) -> Phase {
    match storage.clone().get_dialogue(ChatId(chat_id)).await {
        Ok(phase) => phase.unwrap_or_default(),
        Err(e) => {
            tracing::error!("Failed to read dialogue of chat {}: {}", chat_id, e);
            Phase::Idle
        }
    }
}

/// Replaces the phase of `chat_id`. `Idle` removes the entry.
pub async fn store_phase(storage: &Arc<PhaseStorage>, chat_id: i64, phase: Phase) {
    let result = if phase == Phase::Idle {
        match storage.clone().remove_dialogue(ChatId(chat_id)).await {
            Err(InMemStorageError::DialogueNotFound) => Ok(()),
            other => other,
        }
    } else {
        storage.clone().update_dialogue(ChatId(chat_id), phase).await
    };
    if let Err(e) = result {
        tracing::error!("Failed to store dialogue of chat {}: {}", chat_id, e);
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Origin,
    Destination,
}

/// Drives the route dialogue and delivers schedules through the gateway.
///
/// Every handler returns the chat's phase after the event. User-facing
/// problems (no matches, wrong phase, API failure) are answered in the chat
/// and do not surface as `Err`; only gateway failures do.
pub struct RouteDialogue {
    storage: Arc<PhaseStorage>,
    fetcher: Arc<ScheduleFetcher>,
    gateway: Arc<dyn MessagingGateway>,
    quick_routes: QuickRoutes,
}

impl RouteDialogue {
    pub fn new(
        storage: Arc<PhaseStorage>,
        fetcher: Arc<ScheduleFetcher>,
        gateway: Arc<dyn MessagingGateway>,
        quick_routes: QuickRoutes,
    ) -> Self {
        Self {
            storage,
            fetcher,
            gateway,
            quick_routes,
        }
    }

    pub async fn phase(&self, chat_id: i64) -> Phase {
        load_phase(&self.storage, chat_id).await
    }

    pub fn gateway(&self) -> &dyn MessagingGateway {
        self.gateway.as_ref()
    }

    /// Sends the home / work / other menu. Leaves the phase untouched.
    pub async fn show_menu(&self, chat_id: i64) -> Result<Phase, BotError> {
        let rows = vec![vec![
            Choice::new(
                FeedbackType::Home.label("בית"),
                CallbackAction::Quick(QuickRoute::Home).encode(),
            ),
            Choice::new(
                FeedbackType::Work.label("עבודה"),
                CallbackAction::Quick(QuickRoute::Work).encode(),
            ),
            Choice::new(
                FeedbackType::Search.label("אחר"),
                CallbackAction::OtherRoute.encode(),
            ),
        ]];
        self.gateway
            .send_choices(chat_id, &FeedbackType::Train.message("בחר יעד:"), &rows)
            .await?;
        Ok(self.phase(chat_id).await)
    }

    /// Drops any dialogue in progress.
    pub async fn reset(&self, chat_id: i64) -> Phase {
        self.transition(chat_id, "reset", Phase::Idle).await;
        Phase::Idle
    }

    /// Acknowledges a button press and routes it by its payload.
    pub async fn handle_callback(
        &self,
        chat_id: i64,
        user: &str,
        callback_id: &str,
        data: &str,
    ) -> Result<Phase, BotError> {
        if let Err(e) = self.gateway.acknowledge(callback_id).await {
            tracing::error!("Failed to acknowledge callback {}: {}", callback_id, e);
        }

        match CallbackAction::parse(data) {
            Some(CallbackAction::Quick(route)) => self.quick_route(chat_id, user, route).await,
            Some(CallbackAction::OtherRoute) => self.start_other_route(chat_id).await,
            Some(CallbackAction::Station(id)) => self.select_station(chat_id, &id).await,
            Some(CallbackAction::Search) => self.search(chat_id, user).await,
            None => {
                let err = BotError::InvalidState {
                    phase: self.phase(chat_id).await.to_string(),
                    event: format!("callback {data:?}"),
                };
                self.recover(chat_id, "callback", err).await
            }
        }
    }

    /// Starts (or restarts) the free route dialogue.
    pub async fn start_other_route(&self, chat_id: i64) -> Result<Phase, BotError> {
        self.transition(chat_id, "other route", Phase::AwaitingOrigin).await;
        self.gateway
            .send_text(
                chat_id,
                &FeedbackType::Station.message("אנא הקלד את האותיות הראשונות של תחנת המוצא."),
            )
            .await?;
        Ok(Phase::AwaitingOrigin)
    }

    /// Treats `text` as a station query for whichever side is being chosen.
    ///
    /// Typing again while the suggestions are on screen runs a new query for
    /// the same side. In `Ready` the search button is offered again.
    pub async fn handle_text(&self, chat_id: i64, text: &str) -> Result<Phase, BotError> {
        let result = match self.phase(chat_id).await {
            Phase::AwaitingOrigin | Phase::AwaitingOriginSelection => {
                self.suggest(chat_id, text, Side::Origin, Phase::AwaitingOriginSelection)
                    .await
            }
            Phase::AwaitingDestination { origin }
            | Phase::AwaitingDestinationSelection { origin } => {
                self.suggest(
                    chat_id,
                    text,
                    Side::Destination,
                    Phase::AwaitingDestinationSelection { origin },
                )
                .await
            }
            Phase::Ready {
                origin,
                destination,
            } => self.offer_search(chat_id, &origin, &destination).await,
            Phase::Idle => Err(BotError::InvalidState {
                phase: Phase::Idle.to_string(),
                event: "text".to_string(),
            }),
        };
        self.settle(chat_id, "text", result).await
    }

    /// Records a tapped station suggestion.
    pub async fn select_station(&self, chat_id: i64, station_id: &str) -> Result<Phase, BotError> {
        let result = self.apply_selection(chat_id, station_id).await;
        self.settle(chat_id, "selection", result).await
    }

    /// Fetches the schedule for a `Ready` chat and sends it.
    pub async fn search(&self, chat_id: i64, user: &str) -> Result<Phase, BotError> {
        let result = match self.phase(chat_id).await {
            Phase::Ready {
                origin,
                destination,
            } => match self.deliver_schedule(chat_id, user, &origin, &destination).await {
                Ok(()) => {
                    self.transition(chat_id, "search", Phase::Idle).await;
                    Ok(Phase::Idle)
                }
                Err(e) => Err(e),
            },
            phase => Err(BotError::InvalidState {
                phase: phase.to_string(),
                event: "search".to_string(),
            }),
        };
        self.settle(chat_id, "search", result).await
    }

    /// Sends the schedule for a fixed shortcut without touching the dialogue.
    pub async fn quick_route(
        &self,
        chat_id: i64,
        user: &str,
        route: QuickRoute,
    ) -> Result<Phase, BotError> {
        let (origin, destination) = self.quick_routes.stations(route);
        tracing::info!("Quick route {:?} requested in chat {}", route, chat_id);
        let result = match self.deliver_schedule(chat_id, user, origin, destination).await {
            Ok(()) => Ok(self.phase(chat_id).await),
            Err(e) => Err(e),
        };
        self.settle(chat_id, "quick route", result).await
    }

    async fn suggest(
        &self,
        chat_id: i64,
        query: &str,
        side: Side,
        next: Phase,
    ) -> Result<Phase, BotError> {
        let query = validate_station_query(query).map_err(|e| {
            tracing::debug!("Rejected station query in chat {}: {}", chat_id, e);
            BotError::LookupMiss {
                query: query.to_string(),
            }
        })?;
        let stations = self.fetcher.stations();
        let matches = stations.search(query, Some(MAX_SUGGESTIONS));
        if matches.is_empty() {
            return Err(BotError::LookupMiss {
                query: query.to_string(),
            });
        }

        let rows: Vec<Vec<Choice>> = matches
            .iter()
            .map(|station| {
                vec![Choice::new(
                    FeedbackType::Station.message(&station.name_local),
                    CallbackAction::Station(station.id.clone()).encode(),
                )]
            })
            .collect();
        let prompt = match side {
            Side::Origin => "אנא בחר תחנת מוצא:",
            Side::Destination => "אנא בחר תחנת יעד:",
        };
        self.gateway
            .send_choices(chat_id, &FeedbackType::Station.message(prompt), &rows)
            .await?;

        self.transition(chat_id, "text", next.clone()).await;
        Ok(next)
    }

    async fn apply_selection(&self, chat_id: i64, station_id: &str) -> Result<Phase, BotError> {
        let phase = self.phase(chat_id).await;
        let stations = self.fetcher.stations();

        match phase {
            Phase::AwaitingOriginSelection => {
                let station = stations.find_by_id(station_id).ok_or_else(|| {
                    BotError::LookupMiss {
                        query: station_id.to_string(),
                    }
                })?;
                let next = Phase::AwaitingDestination {
                    origin: station.id.clone(),
                };
                self.transition(chat_id, "selection", next.clone()).await;
                self.gateway
                    .send_text(
                        chat_id,
                        &FeedbackType::Station
                            .message("אנא הקלד את האותיות הראשונות של תחנת היעד."),
                    )
                    .await?;
                Ok(next)
            }
            Phase::AwaitingDestinationSelection { origin } => {
                let station = stations.find_by_id(station_id).ok_or_else(|| {
                    BotError::LookupMiss {
                        query: station_id.to_string(),
                    }
                })?;
                let destination = station.id.clone();
                let next = Phase::Ready {
                    origin: origin.clone(),
                    destination: destination.clone(),
                };
                self.transition(chat_id, "selection", next).await;
                self.offer_search(chat_id, &origin, &destination).await
            }
            phase => Err(BotError::InvalidState {
                phase: phase.to_string(),
                event: "selection".to_string(),
            }),
        }
    }

    // Route summary with the search button; the chat is expected in `Ready`.
    async fn offer_search(
        &self,
        chat_id: i64,
        origin: &str,
        destination: &str,
    ) -> Result<Phase, BotError> {
        let stations = self.fetcher.stations();
        let summary = format!(
            "רכבת מתחנת {} לתחנת {}",
            stations.display_name(origin),
            stations.display_name(destination)
        );
        let rows = vec![vec![Choice::new(
            format!("חפש {}", FeedbackType::Search.emoji()),
            CallbackAction::Search.encode(),
        )]];
        self.gateway
            .send_choices(chat_id, &FeedbackType::Train.message(&summary), &rows)
            .await?;
        Ok(Phase::Ready {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })
    }

    async fn deliver_schedule(
        &self,
        chat_id: i64,
        user: &str,
        origin: &str,
        destination: &str,
    ) -> Result<(), BotError> {
        let chunks = self
            .fetcher
            .get_schedule(user, origin, destination)
            .await
            .map_err(|e| {
                log_fetch_error(origin, destination, &e.to_string());
                e
            })?;

        for chunk in &chunks {
            self.gateway.send_text(chat_id, chunk).await?;
        }
        Ok(())
    }

    async fn settle(
        &self,
        chat_id: i64,
        event: &str,
        result: Result<Phase, BotError>,
    ) -> Result<Phase, BotError> {
        match result {
            Ok(phase) => Ok(phase),
            Err(e) => self.recover(chat_id, event, e).await,
        }
    }

    // Reports a recoverable error to the user. A wrong-phase event also drops
    // the chat back to Idle; other errors leave the phase as it was.
    async fn recover(&self, chat_id: i64, event: &str, err: BotError) -> Result<Phase, BotError> {
        match err {
            BotError::Gateway(_) => return Err(err),
            BotError::InvalidState { .. } => {
                self.transition(chat_id, event, Phase::Idle).await;
            }
            _ => {}
        }
        log_dialogue_error(chat_id, event, &err.to_string());
        self.gateway.send_text(chat_id, &err.user_message()).await?;
        Ok(self.phase(chat_id).await)
    }

    async fn transition(&self, chat_id: i64, event: &str, next: Phase) {
        let previous = self.phase(chat_id).await;
        log_dialogue_transition(chat_id, event, previous.name(), next.name());
        store_phase(&self.storage, chat_id, next).await;
    }
}
