use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::matcher_client::MatcherError;

/// Relay-level error type.
/// Implements `IntoResponse` so every failure reaches the browser as
/// `{ "success": false, "code": ..., "message": ... }`.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Downstream error: {0}")]
    Downstream(String),

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            RelayError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            RelayError::Downstream(_) => (StatusCode::BAD_GATEWAY, "DOWNSTREAM_ERROR"),
            RelayError::UpstreamTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            RelayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// The user-facing message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            RelayError::InvalidInput(msg)
            | RelayError::Downstream(msg)
            | RelayError::UpstreamTimeout(msg)
            | RelayError::Internal(msg) => msg,
        }
    }
}

impl From<MatcherError> for RelayError {
    fn from(err: MatcherError) -> Self {
        match &err {
            MatcherError::Http(e) if e.is_timeout() => RelayError::UpstreamTimeout(err.to_string()),
            MatcherError::Http(_) => RelayError::Internal(err.to_string()),
            MatcherError::Api { .. }
            | MatcherError::Parse(_)
            | MatcherError::Rejected(_)
            | MatcherError::UnexpectedShape(_) => RelayError::Downstream(err.to_string()),
        }
    }
}

impl From<MultipartRejection> for RelayError {
    fn from(rejection: MultipartRejection) -> Self {
        RelayError::InvalidInput(format!("Expected a multipart upload: {}", rejection.body_text()))
    }
}

impl From<MultipartError> for RelayError {
    fn from(err: MultipartError) -> Self {
        RelayError::InvalidInput(format!("Failed to read multipart data: {}", err.body_text()))
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        match &self {
            RelayError::InvalidInput(msg) => tracing::warn!("Rejected upload: {msg}"),
            RelayError::Downstream(msg) => tracing::error!("Matching service error: {msg}"),
            RelayError::UpstreamTimeout(msg) => tracing::error!("Matching service timed out: {msg}"),
            RelayError::Internal(msg) => tracing::error!("Internal error: {msg}"),
        }

        let body = Json(json!({
            "success": false,
            "code": code,
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}
