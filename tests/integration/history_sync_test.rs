//! History persistence tests
//!
//! These tests cover loading stored history into a session, recording
//! submitted queries with the history endpoint, and building sessions from
//! settings.

use super::{config_for, init_test_env};
use search_session::config::{get_config, load_config, reset_config, SessionConfig};
use search_session::history::format_recent_list;
use search_session::session::{Phase, SessionController};
use serde_json::json;
use serial_test::serial;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn persistent_config(server: &MockServer) -> SessionConfig {
    SessionConfig {
        persist_history: true,
        ..config_for(server)
    }
}

#[tokio::test]
async fn test_restore_history_from_backend() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"query": "vector search", "timestamp": 3000},
            {"query": "vector search", "timestamp": 2000},
            {"query": "rag", "timestamp": "2024-01-01T00:00:00Z"},
            {"query": "   ", "timestamp": 1000}
        ])))
        .mount(&server)
        .await;

    let mut controller = SessionController::from_config(&persistent_config(&server)).unwrap();
    let count = controller.restore_history().await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(controller.recent_queries(), vec!["vector search", "rag"]);
    assert_eq!(format_recent_list(controller.history()).len(), 2);
}

#[tokio::test]
async fn test_unavailable_history_store_keeps_local_history() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/history"))
        .respond_with(
            ResponseTemplate::new(501).set_body_json(json!({"detail": "Not implemented yet"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut controller = SessionController::from_config(&persistent_config(&server)).unwrap();
    controller.search("rag").await;

    let err = controller.restore_history().await.unwrap_err();
    assert_eq!(err.message(), "Not implemented yet");
    assert_eq!(controller.recent_queries(), vec!["rag"]);
    assert!(controller.state().error.is_none());
}

#[tokio::test]
async fn test_submitted_query_is_recorded() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/history"))
        .and(body_json(json!({"query": "rust ownership"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"query": "rust ownership", "timestamp": 1234})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut controller = SessionController::from_config(&persistent_config(&server)).unwrap();
    controller.search(" rust ownership ").await;

    // The history POST runs detached from the search; give it time to land.
    for _ in 0..50 {
        let received = server.received_requests().await.unwrap_or_default();
        if received
            .iter()
            .any(|request| request.url.path() == "/api/search/history")
        {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    server.verify().await;
}

#[tokio::test]
async fn test_history_store_failure_does_not_fail_search() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/history"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut controller = SessionController::from_config(&persistent_config(&server)).unwrap();
    controller.search("rag").await;

    assert_eq!(controller.state().phase(), Phase::Success);
}

#[test]
#[serial]
fn test_session_from_settings() {
    let settings = json!({
        "search-session": {
            "baseUrl": "http://search.internal:9000",
            "topK": 20,
            "historyLimit": 3
        }
    });

    let config = load_config(Some(settings)).unwrap();
    assert_eq!(get_config(), config);

    let controller = SessionController::from_global_config().unwrap();
    assert_eq!(controller.options().top_k, 20);
    assert_eq!(controller.options().max_history, 3);

    reset_config();
}

#[test]
#[serial]
fn test_invalid_settings_are_rejected() {
    let settings = json!({
        "search-session": {
            "topK": 500
        }
    });

    assert!(load_config(Some(settings)).is_err());
    reset_config();
}
