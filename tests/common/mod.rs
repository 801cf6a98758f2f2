#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use serde_json::{Value, json};
use shortlytics::infrastructure::memory::MemoryStore;
use shortlytics::routes::router;
use shortlytics::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://sho.rt";

/// Builds state over a fresh in-memory store, trusting forwarded headers so
/// tests can choose the client IP.
pub fn create_test_state() -> AppState {
    let store = MemoryStore::new();

    AppState::new(
        Arc::new(store.link_repository()),
        Arc::new(store.click_repository()),
        BASE_URL,
        6,
        true,
    )
}

pub fn create_test_server() -> TestServer {
    TestServer::new(router(create_test_state())).unwrap()
}

/// Shortens `long_url` and returns the new short id.
pub async fn shorten(server: &TestServer, long_url: &str) -> String {
    let response = server
        .post("/shorten")
        .json(&json!({ "longUrl": long_url }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["shortId"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Follows a short link as a client with the given IP.
pub async fn visit(server: &TestServer, short_id: &str, ip: &'static str) -> TestResponse {
    server
        .get(&format!("/{short_id}"))
        .add_header(
            HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_static(ip),
        )
        .await
}

pub async fn analytics(server: &TestServer, short_id: &str) -> Value {
    let response = server.get(&format!("/an/{short_id}")).await;
    response.assert_status_ok();
    response.json::<Value>()
}
