//! HTTP error responses.
//!
//! The compiler never fails on prompt content, so the only errors surfaced
//! here are malformed request bodies.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error type returned by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body was missing, not JSON, or lacked a required field.
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(status = %status, error = %self, "rejecting request");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
