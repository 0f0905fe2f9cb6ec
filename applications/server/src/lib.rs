//! SciPlayer Server Library
//!
//! HTTP surface for registering playback devices and attaching playlist URLs
//! to them. Handlers validate request shape and delegate every decision about
//! devices and playlists to a [`sciplayer_storage::DeviceStore`].
//!
//! This library exposes the router and its components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post, MethodRouter},
    Router,
};
use std::time::Duration;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

/// Build the application router
///
/// `request_timeout` bounds each request end to end. A request that runs
/// past it is answered with 408 and a JSON error, and its storage work is
/// dropped, which rolls back any uncommitted transaction.
///
/// The playlists collection also answers with a trailing slash.
pub fn create_router(app_state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route(
            "/healthz",
            get(api::health::healthz).fallback(api::allow_get),
        )
        .route(
            "/devices",
            post(api::devices::register_device).fallback(api::allow_post),
        )
        .route("/devices/:id/playlists", playlists_routes())
        .route("/devices/:id/playlists/", playlists_routes())
        .fallback(api::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(api::handle_timeout_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(app_state)
}

fn playlists_routes() -> MethodRouter<AppState> {
    post(api::playlists::attach_playlist)
        .get(api::playlists::list_playlists)
        .fallback(api::allow_post_get)
}
