#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{dialogue_for, fetcher_for, quick_routes, timetable_body, FakeRailApi, RecordingGateway, Sent};
use rail_schedule_bot::bot::conversation::{Phase, PhaseStorage, RouteDialogue};
use rail_schedule_bot::error::BotError;
use teloxide::dispatching::dialogue::Storage;
use teloxide::types::ChatId;

const CHAT: i64 = 42;
const USER: &str = "1001";

async fn ok_api() -> FakeRailApi {
    FakeRailApi::start(
        StatusCode::OK,
        timetable_body(&["2025-01-27T08:01:00", "2025-01-27T08:31:00"]),
    )
    .await
}

async fn drive_to_ready(dialogue: &RouteDialogue, chat_id: i64) {
    dialogue.start_other_route(chat_id).await.unwrap();
    dialogue.handle_text(chat_id, "savidor").await.unwrap();
    dialogue.select_station(chat_id, "3700").await.unwrap();
    dialogue.handle_text(chat_id, "השלום").await.unwrap();
    let phase = dialogue.select_station(chat_id, "4600").await.unwrap();
    assert_eq!(
        phase,
        Phase::Ready {
            origin: "3700".to_string(),
            destination: "4600".to_string()
        }
    );
}

#[tokio::test]
async fn test_full_route_dialogue() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    let phase = dialogue
        .handle_callback(CHAT, USER, "cb-1", "route:other")
        .await
        .unwrap();
    assert_eq!(phase, Phase::AwaitingOrigin);
    assert_eq!(gateway.sent()[0], Sent::Ack("cb-1".to_string()));

    let phase = dialogue.handle_text(CHAT, "savidor").await.unwrap();
    assert_eq!(phase, Phase::AwaitingOriginSelection);
    let (_, rows) = gateway.last_choices(CHAT).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0].data, "station:3700");

    let phase = dialogue
        .handle_callback(CHAT, USER, "cb-2", "station:3700")
        .await
        .unwrap();
    assert_eq!(
        phase,
        Phase::AwaitingDestination {
            origin: "3700".to_string()
        }
    );

    let phase = dialogue.handle_text(CHAT, "השלום").await.unwrap();
    assert_eq!(
        phase,
        Phase::AwaitingDestinationSelection {
            origin: "3700".to_string()
        }
    );

    let phase = dialogue
        .handle_callback(CHAT, USER, "cb-3", "station:4600")
        .await
        .unwrap();
    assert!(matches!(phase, Phase::Ready { .. }));
    let (summary, rows) = gateway.last_choices(CHAT).unwrap();
    assert!(summary.contains("תל אביב - סבידור מרכז"));
    assert!(summary.contains("תל אביב - השלום"));
    assert_eq!(rows[0][0].data, "search");

    let phase = dialogue
        .handle_callback(CHAT, USER, "cb-4", "search")
        .await
        .unwrap();
    assert_eq!(phase, Phase::Idle);
    assert_eq!(dialogue.phase(CHAT).await, Phase::Idle);
    assert_eq!(api.hits(), 1);

    let query = api.last_query().unwrap();
    assert_eq!(query.get("fromStation").map(String::as_str), Some("3700"));
    assert_eq!(query.get("toStation").map(String::as_str), Some("4600"));

    let schedule = gateway.texts(CHAT).pop().unwrap();
    assert!(schedule.contains("08:01:00"));
    assert!(schedule.contains("08:31:00"));
}

#[tokio::test]
async fn test_repeated_search_is_served_from_cache() {
    let api = ok_api().await;
    let (dialogue, gateway, cache) = dialogue_for(&api);

    drive_to_ready(&dialogue, CHAT).await;
    dialogue.search(CHAT, USER).await.unwrap();
    drive_to_ready(&dialogue, CHAT).await;
    dialogue.search(CHAT, USER).await.unwrap();

    assert_eq!(api.hits(), 1);
    assert_eq!(cache.len(), 1);
    let texts = gateway.texts(CHAT);
    let schedules: Vec<_> = texts.iter().filter(|t| t.contains("08:01:00")).collect();
    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[0], schedules[1]);
}

#[tokio::test]
async fn test_no_matching_station_reprompts() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    let phase = dialogue.handle_text(CHAT, "zzzz").await.unwrap();

    assert_eq!(phase, Phase::AwaitingOrigin);
    let expected = BotError::LookupMiss {
        query: "zzzz".to_string(),
    }
    .user_message();
    assert_eq!(gateway.texts(CHAT).last(), Some(&expected));
}

#[tokio::test]
async fn test_overlong_query_is_a_lookup_miss() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    let phase = dialogue.handle_text(CHAT, &"a".repeat(80)).await.unwrap();

    assert_eq!(phase, Phase::AwaitingOrigin);
    assert!(gateway.last_choices(CHAT).is_none());
}

#[tokio::test]
async fn test_typing_again_during_selection_requeries_same_side() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    dialogue.handle_text(CHAT, "savidor").await.unwrap();
    let phase = dialogue.handle_text(CHAT, "haifa").await.unwrap();

    assert_eq!(phase, Phase::AwaitingOriginSelection);
    let (_, rows) = gateway.last_choices(CHAT).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row[0].data.starts_with("station:2")));
}

#[tokio::test]
async fn test_text_while_idle_is_invalid_state() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    let phase = dialogue.handle_text(CHAT, "savidor").await.unwrap();

    assert_eq!(phase, Phase::Idle);
    let texts = gateway.texts(CHAT);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("מצב לא ידוע"));
}

#[tokio::test]
async fn test_selection_outside_selection_phase_resets() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    let phase = dialogue.select_station(CHAT, "3700").await.unwrap();

    assert_eq!(phase, Phase::Idle);
    assert!(gateway.texts(CHAT).last().unwrap().contains("מצב לא ידוע"));
}

#[tokio::test]
async fn test_unknown_station_id_keeps_selection_phase() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    dialogue.handle_text(CHAT, "savidor").await.unwrap();
    let phase = dialogue.select_station(CHAT, "99999").await.unwrap();

    assert_eq!(phase, Phase::AwaitingOriginSelection);
    assert!(gateway.texts(CHAT).last().unwrap().contains("לא נמצאו תחנות"));
}

#[tokio::test]
async fn test_search_before_ready_is_invalid_state() {
    let api = ok_api().await;
    let (dialogue, _gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    let phase = dialogue.search(CHAT, USER).await.unwrap();

    assert_eq!(phase, Phase::Idle);
    assert_eq!(api.hits(), 0);
}

#[tokio::test]
async fn test_unknown_callback_payload_resets() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    let phase = dialogue
        .handle_callback(CHAT, USER, "cb-x", "bogus")
        .await
        .unwrap();

    assert_eq!(phase, Phase::Idle);
    assert!(gateway.sent().contains(&Sent::Ack("cb-x".to_string())));
}

#[tokio::test]
async fn test_fetch_failure_keeps_ready_for_retry() {
    let api = FakeRailApi::start(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let (dialogue, gateway, cache) = dialogue_for(&api);

    drive_to_ready(&dialogue, CHAT).await;
    let phase = dialogue.search(CHAT, USER).await.unwrap();

    assert!(matches!(phase, Phase::Ready { .. }));
    let expected = BotError::Fetch(String::new()).user_message();
    assert_eq!(gateway.texts(CHAT).last(), Some(&expected));
    assert!(cache.is_empty());

    dialogue.search(CHAT, USER).await.unwrap();
    assert_eq!(api.hits(), 2);
}

#[tokio::test]
async fn test_quick_routes_do_not_touch_dialogue() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    let phase = dialogue
        .handle_callback(CHAT, USER, "cb-h", "route:home")
        .await
        .unwrap();

    assert_eq!(phase, Phase::AwaitingOrigin);
    let query = api.last_query().unwrap();
    assert_eq!(query.get("fromStation").map(String::as_str), Some("4600"));
    assert_eq!(query.get("toStation").map(String::as_str), Some("8700"));

    dialogue
        .handle_callback(CHAT, USER, "cb-w", "route:work")
        .await
        .unwrap();
    let query = api.last_query().unwrap();
    assert_eq!(query.get("fromStation").map(String::as_str), Some("8700"));
    assert_eq!(query.get("toStation").map(String::as_str), Some("4600"));

    assert_eq!(api.hits(), 2);
    assert!(gateway.texts(CHAT).iter().any(|t| t.contains("08:01:00")));
}

#[tokio::test]
async fn test_failed_acknowledge_is_not_fatal() {
    let api = ok_api().await;
    let gateway = Arc::new(RecordingGateway::failing_acks());
    let (fetcher, _cache) = fetcher_for(&api);
    let dialogue = RouteDialogue::new(PhaseStorage::new(), fetcher, gateway.clone(), quick_routes());

    let phase = dialogue
        .handle_callback(CHAT, USER, "cb-1", "route:other")
        .await
        .unwrap();

    assert_eq!(phase, Phase::AwaitingOrigin);
    assert_eq!(gateway.texts(CHAT).len(), 1);
}

#[tokio::test]
async fn test_chats_are_independent() {
    let api = ok_api().await;
    let (dialogue, _gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(1).await.unwrap();
    dialogue.handle_text(1, "savidor").await.unwrap();
    dialogue.start_other_route(2).await.unwrap();

    assert_eq!(dialogue.phase(1).await, Phase::AwaitingOriginSelection);
    assert_eq!(dialogue.phase(2).await, Phase::AwaitingOrigin);
    assert_eq!(dialogue.phase(3).await, Phase::Idle);
}

#[tokio::test]
async fn test_menu_and_reset() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    dialogue.start_other_route(CHAT).await.unwrap();
    let phase = dialogue.show_menu(CHAT).await.unwrap();
    assert_eq!(phase, Phase::AwaitingOrigin);

    let (_, rows) = gateway.last_choices(CHAT).unwrap();
    let data: Vec<_> = rows[0].iter().map(|c| c.data.as_str()).collect();
    assert_eq!(data, vec!["route:home", "route:work", "route:other"]);

    assert_eq!(dialogue.reset(CHAT).await, Phase::Idle);
    assert_eq!(dialogue.phase(CHAT).await, Phase::Idle);
}

#[tokio::test]
async fn test_text_in_ready_keeps_route_and_reoffers_search() {
    let api = ok_api().await;
    let (dialogue, gateway, _cache) = dialogue_for(&api);

    drive_to_ready(&dialogue, CHAT).await;
    gateway.clear();
    let phase = dialogue.handle_text(CHAT, "savidor").await.unwrap();

    assert_eq!(
        phase,
        Phase::Ready {
            origin: "3700".to_string(),
            destination: "4600".to_string()
        }
    );
    assert!(gateway.texts(CHAT).is_empty());
    let (_, rows) = gateway.last_choices(CHAT).unwrap();
    assert_eq!(rows[0][0].data, "search");
    assert_eq!(api.hits(), 0);
}

#[tokio::test]
async fn test_phase_is_kept_in_dialogue_storage() {
    let api = ok_api().await;
    let storage = PhaseStorage::new();
    let (fetcher, _cache) = fetcher_for(&api);
    let dialogue = RouteDialogue::new(
        storage.clone(),
        fetcher,
        Arc::new(RecordingGateway::new()),
        quick_routes(),
    );

    dialogue.start_other_route(CHAT).await.unwrap();
    assert_eq!(
        storage.clone().get_dialogue(ChatId(CHAT)).await.unwrap(),
        Some(Phase::AwaitingOrigin)
    );

    dialogue.reset(CHAT).await;
    assert_eq!(storage.clone().get_dialogue(ChatId(CHAT)).await.unwrap(), None);
}
