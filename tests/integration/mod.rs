//! Integration tests module for the search session
//!
//! This module provides common utilities and test infrastructure
//! for exercising the session controller against a mock search backend.

pub mod history_sync_test;
pub mod session_flow_test;

use search_session::config::SessionConfig;
use serde_json::{json, Value};
use std::sync::Once;
use wiremock::MockServer;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Session configuration pointing at a mock server.
pub fn config_for(server: &MockServer) -> SessionConfig {
    SessionConfig {
        base_url: server.uri(),
        timeout: 5_000,
        ..Default::default()
    }
}

/// One search result as the backend serializes it.
pub fn result_json(id: i64, title: &str, score: f64) -> Value {
    json!({
        "document": {
            "page_content": format!("Content of {}", title),
            "metadata": {"id": id, "title": title}
        },
        "score": score
    })
}
