//! Common test utilities and fixtures
#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use sciplayer_server::{create_router, state::AppState};
use sciplayer_storage::{DeviceStore, SqliteStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Create a test store backed by a real SQLite file
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn create_test_store() -> Result<(Arc<SqliteStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("sciplayer.db");
    let store = SqliteStore::open(path.to_str().expect("Temp path is not UTF-8")).await?;
    Ok((Arc::new(store), temp_dir))
}

/// Build the full application router around a store
pub fn create_test_app(store: Arc<dyn DeviceStore>) -> Router {
    create_router(AppState::new(store), Duration::from_secs(5))
}

/// Build a request carrying a raw JSON body
pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a request without a body
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).expect("Response body is not JSON")
}

/// Read a response body as text
pub async fn read_text(response: Response<Body>) -> String {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body_bytes.to_vec()).unwrap()
}

pub mod fixtures {
    pub const DEVICE_ID: &str = "device-123";
    pub const UNKNOWN_DEVICE_ID: &str = "device-999";
    pub const PLAYLIST_NAME: &str = "My playlist";
    pub const PLAYLIST_URL: &str = "https://example.com/channel.m3u8";
}
