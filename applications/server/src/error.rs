/// Server error types
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sciplayer_storage::StoreError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Carries the value of the `Allow` header
    #[error("Method not allowed, expected one of: {0}")]
    MethodNotAllowed(&'static str),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Request exceeded its deadline")]
    RequestTimeout,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::MethodNotAllowed(allowed) => {
                let body = Json(json!({ "error": "method not allowed" }));
                return (
                    StatusCode::METHOD_NOT_ALLOWED,
                    [(header::ALLOW, allowed)],
                    body,
                )
                    .into_response();
            }
            ServerError::Store(StoreError::DeviceNotFound(_)) => {
                (StatusCode::NOT_FOUND, "device not found".to_string())
            }
            ServerError::Store(ref e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::RequestTimeout => {
                (StatusCode::REQUEST_TIMEOUT, "request timeout".to_string())
            }
            ServerError::Config(ref msg) | ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_convert_and_map_status() {
        let err: ServerError = StoreError::device_not_found("device-999").into();
        assert!(matches!(
            err,
            ServerError::Store(StoreError::DeviceNotFound(ref id)) if id == "device-999"
        ));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err: ServerError = StoreError::Io(sqlx::Error::PoolClosed).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_request_timeout_status() {
        assert_eq!(
            ServerError::RequestTimeout.into_response().status(),
            StatusCode::REQUEST_TIMEOUT
        );
    }
}
