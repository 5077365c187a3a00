//! Error types for the Auth Gateway.
//!
//! `ApiError` is what an HTTP caller sees; `GatewayError` covers start-up
//! and serving failures.

use super::config::ConfigError;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cc_01_domain_validator::RejectionReason;
use std::net::SocketAddr;
use std::time::Duration;

/// Body could not be parsed as JSON.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request format.";

/// Slug lookup miss.
pub const UNIVERSITY_NOT_FOUND_MESSAGE: &str = "University not found";

/// Metrics could not be rendered.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error response: status plus `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// User-visible message
    pub message: &'static str,
    /// Seconds-until-retry hint, sent as `Retry-After`
    pub retry_after: Option<Duration>,
}

impl ApiError {
    /// 400 with `message`.
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            retry_after: None,
        }
    }

    /// 404 with `message`.
    pub fn not_found(message: &'static str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message,
            retry_after: None,
        }
    }

    /// 500 with a generic message.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR_MESSAGE,
            retry_after: None,
        }
    }

    /// Response for a guard rejection. Rate limiting maps to 429, every
    /// other reason to 400 with the uniform message.
    pub fn rejected(reason: RejectionReason, retry_after: Option<Duration>) -> Self {
        match reason {
            RejectionReason::RateLimited => Self {
                status: StatusCode::TOO_MANY_REQUESTS,
                message: reason.user_message(),
                retry_after,
            },
            _ => Self::bad_request(reason.user_message()),
        }
    }

    /// Whole seconds for `Retry-After`, rounded up, at least 1.
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.retry_after
            .map(|d| d.as_millis().div_ceil(1000).max(1))
            .map(|secs| u64::try_from(secs).unwrap_or(u64::MAX))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retry_after = self.retry_after_secs();
        let mut response =
            (self.status, Json(serde_json::json!({ "error": self.message }))).into_response();

        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

/// Gateway-level errors (internal use)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("server bind error on {addr}: {source}")]
    Bind {
        /// Requested address
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
