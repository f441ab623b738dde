//! End-to-end session tests against a mock search backend
//!
//! These tests drive a real `SessionController` over HTTP and check the
//! state a search UI would render after each step.

use super::{config_for, init_test_env, result_json};
use search_session::session::{ApplyStatus, Phase, SessionController};
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_search(server: &MockServer, query: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"query": query, "top_k": 5})))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_result_search() {
    init_test_env();
    let server = MockServer::start().await;
    mount_search(
        &server,
        "rust ownership",
        ResponseTemplate::new(200).set_body_json(json!([result_json(1, "Ownership", 0.92)])),
    )
    .await;

    let mut controller = SessionController::from_config(&config_for(&server)).unwrap();
    let status = controller.search("rust ownership").await;
    assert_eq!(status, Some(ApplyStatus::Applied));

    let state = controller.state();
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.results().len(), 1);
    assert_eq!(state.results()[0].score, 0.92);
    assert_eq!(controller.history()[0].query, "rust ownership");
}

#[tokio::test]
async fn test_search_workflow() {
    init_test_env();
    let server = MockServer::start().await;
    mount_search(
        &server,
        "rust ownership",
        ResponseTemplate::new(200).set_body_json(json!([
            result_json(1, "Ownership", 0.92),
            result_json(2, "Borrowing", 0.81)
        ])),
    )
    .await;

    let mut controller = SessionController::from_config(&config_for(&server)).unwrap();

    // Step 1: Submit with surrounding whitespace
    let pending = controller.submit("  rust ownership  ").unwrap();
    assert_eq!(controller.state().phase(), Phase::Loading);
    assert_eq!(controller.recent_queries(), vec!["rust ownership"]);

    // Step 2: Apply the response
    let outcome = pending.wait().await;
    assert_eq!(controller.apply(outcome), ApplyStatus::Applied);

    // Step 3: Verify rendered state
    let state = controller.state();
    assert_eq!(state.phase(), Phase::Success);
    assert_eq!(state.query, "rust ownership");
    assert_eq!(state.results().len(), 2);
    assert_eq!(state.results()[0].score, 0.92);
    assert_eq!(state.results()[0].document.title(), Some("Ownership"));
    assert_eq!(state.results()[1].document.title(), Some("Borrowing"));
}

#[tokio::test]
async fn test_empty_results() {
    init_test_env();
    let server = MockServer::start().await;
    mount_search(&server, "nothing", ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let mut controller = SessionController::from_config(&config_for(&server)).unwrap();
    controller.search("nothing").await;

    assert!(controller.state().is_empty_result());
    assert_eq!(controller.state().phase(), Phase::Success);
}

#[tokio::test]
async fn test_backend_error_detail_is_shown() {
    init_test_env();
    let server = MockServer::start().await;
    mount_search(
        &server,
        "good",
        ResponseTemplate::new(200).set_body_json(json!([result_json(1, "Good", 0.5)])),
    )
    .await;
    mount_search(
        &server,
        "bad",
        ResponseTemplate::new(400).set_body_json(json!({"detail": "Query must not be empty"})),
    )
    .await;

    let mut controller = SessionController::from_config(&config_for(&server)).unwrap();
    controller.search("good").await;
    controller.search("bad").await;

    let state = controller.state();
    assert_eq!(state.phase(), Phase::Error);
    assert_eq!(state.error.as_deref(), Some("Query must not be empty"));
    assert_eq!(state.results()[0].document.title(), Some("Good"));
    assert_eq!(controller.recent_queries(), vec!["bad", "good"]);
}

#[tokio::test]
async fn test_validation_error_list_is_joined() {
    init_test_env();
    let server = MockServer::start().await;
    mount_search(
        &server,
        "x",
        ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "top_k"], "msg": "must be positive"},
                {"loc": ["body", "query"], "msg": "too short"}
            ]
        })),
    )
    .await;

    let mut controller = SessionController::from_config(&config_for(&server)).unwrap();
    controller.search("x").await;

    let error = controller.state().error.clone().unwrap();
    assert!(error.contains("must be positive"));
    assert!(error.contains("too short"));
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    init_test_env();
    let server = MockServer::start().await;
    mount_search(
        &server,
        "slow",
        ResponseTemplate::new(200)
            .set_body_json(json!([result_json(1, "Slow", 0.9)]))
            .set_delay(Duration::from_millis(400)),
    )
    .await;
    mount_search(
        &server,
        "fast",
        ResponseTemplate::new(200).set_body_json(json!([result_json(2, "Fast", 0.7)])),
    )
    .await;

    let mut controller = SessionController::from_config(&config_for(&server)).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    for query in ["slow", "fast"] {
        let pending = controller.submit(query).unwrap();
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(pending.wait().await);
        });
    }
    drop(tx);

    // Apply outcomes in arrival order
    let mut statuses = Vec::new();
    while let Some(outcome) = rx.recv().await {
        statuses.push((outcome.query.clone(), controller.apply(outcome)));
    }

    assert_eq!(
        statuses,
        vec![
            ("fast".to_string(), ApplyStatus::Applied),
            ("slow".to_string(), ApplyStatus::Discarded),
        ]
    );

    let state = controller.state();
    assert_eq!(state.query, "fast");
    assert!(!state.loading);
    assert_eq!(state.results().len(), 1);
    assert_eq!(state.results()[0].document.title(), Some("Fast"));
    assert_eq!(controller.superseded_count(), 1);
    assert_eq!(controller.recent_queries(), vec!["fast", "slow"]);
}

#[tokio::test]
async fn test_unreachable_backend() {
    init_test_env();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = search_session::SessionConfig {
        base_url: format!("http://127.0.0.1:{}", port),
        ..Default::default()
    };

    let mut controller = SessionController::from_config(&config).unwrap();
    controller.search("rag").await;

    let state = controller.state();
    assert_eq!(state.phase(), Phase::Error);
    assert!(!state.error.clone().unwrap().is_empty());
    assert_eq!(controller.recent_queries(), vec!["rag"]);
}

#[tokio::test]
async fn test_select_recent_reruns_query() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"query": "rag", "top_k": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;
    mount_search(&server, "llm", ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let mut controller = SessionController::from_config(&config_for(&server)).unwrap();
    controller.search("rag").await;
    controller.search("llm").await;

    let pending = controller.select_recent(1).unwrap();
    let outcome = pending.wait().await;
    controller.apply(outcome);

    assert_eq!(controller.state().query, "rag");
    assert_eq!(controller.recent_queries(), vec!["rag", "llm", "rag"]);
}
