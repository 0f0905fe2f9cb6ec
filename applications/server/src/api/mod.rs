/// API route modules
pub mod devices;
pub mod health;
pub mod playlists;

use crate::error::{Result, ServerError};
use axum::BoxError;
use serde::de::DeserializeOwned;
use tower::timeout::error::Elapsed;
use url::Url;

/// Decode a JSON request body regardless of its content type
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|_| ServerError::BadRequest("invalid JSON payload".to_string()))
}

/// Trim an optional request field, treating absent and blank alike
pub(crate) fn required_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ServerError::BadRequest(format!("{name} is required"))),
    }
}

/// An absolute URL has both a scheme and a host
pub(crate) fn is_absolute_url(raw: &str) -> bool {
    Url::parse(raw).map(|url| url.has_host()).unwrap_or(false)
}

/// Fallback for unknown paths
pub async fn not_found() -> ServerError {
    ServerError::NotFound("not found".to_string())
}

/// Turn a failure of the timeout middleware into a JSON error
pub async fn handle_timeout_error(err: BoxError) -> ServerError {
    if err.is::<Elapsed>() {
        ServerError::RequestTimeout
    } else {
        ServerError::Internal(format!("unhandled middleware error: {err}"))
    }
}

/// Method fallback for GET-only routes
pub async fn allow_get() -> ServerError {
    ServerError::MethodNotAllowed("GET")
}

/// Method fallback for POST-only routes
pub async fn allow_post() -> ServerError {
    ServerError::MethodNotAllowed("POST")
}

/// Method fallback for routes accepting POST and GET
pub async fn allow_post_get() -> ServerError {
    ServerError::MethodNotAllowed("POST, GET")
}
