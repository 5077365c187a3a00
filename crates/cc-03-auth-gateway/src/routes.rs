//! HTTP handlers.
//!
//! | Route | Method | Purpose |
//! |-------|--------|---------|
//! | `/api/auth/validate-email` | POST | Guarded email check |
//! | `/api/universities` | GET | Campus directory, `?search=` and `?limit=` |
//! | `/api/universities/:slug` | GET | One campus |
//! | `/health` | GET | Liveness |
//! | `/metrics` | GET | Prometheus text |

use crate::domain::{ApiError, INVALID_REQUEST_MESSAGE, UNIVERSITY_NOT_FOUND_MESSAGE};
use crate::gate::EmailGate;
use crate::middleware::{client_origin, TracingLayer};
use axum::{
    body::Bytes,
    extract::{ConnectInfo, Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use campus_telemetry::{encode_metrics, register_metrics};
use cc_01_domain_validator::{Candidate, RejectionReason};
use cc_02_abuse_limiter::AttemptLimiter;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::error;

/// Default page size for the directory listing.
pub const DEFAULT_UNIVERSITY_LIMIT: usize = 50;

/// Application state shared across handlers
pub struct AppState<L: AttemptLimiter> {
    gate: Arc<EmailGate<L>>,
}

impl<L: AttemptLimiter> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
        }
    }
}

/// Build the HTTP router around `gate`.
pub fn build_router<L: AttemptLimiter + 'static>(gate: Arc<EmailGate<L>>) -> Router {
    if let Err(e) = register_metrics() {
        error!(error = %e, "Metric registration failed; /metrics will be incomplete");
    }

    Router::new()
        .route("/api/auth/validate-email", post(validate_email::<L>))
        .route("/api/universities", get(list_universities::<L>))
        .route("/api/universities/:slug", get(get_university::<L>))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(TracingLayer::new())
        .with_state(AppState { gate })
}

/// Guarded email validation.
///
/// The body is read raw so a malformed document gets the fixed
/// "Invalid request format." reply rather than an extractor rejection.
async fn validate_email<L: AttemptLimiter + 'static>(
    State(state): State<AppState<L>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Ok(payload) = serde_json::from_slice::<serde_json::Value>(&body) else {
        return ApiError::bad_request(INVALID_REQUEST_MESSAGE).into_response();
    };

    let origin = client_origin(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let candidate = Candidate::from(payload.get("email"));
    let result = state.gate.guard(candidate, &origin);

    match (result.reason(), result.sanitized_email()) {
        (None, Some(email)) => Json(serde_json::json!({
            "valid": true,
            "sanitizedEmail": email,
            "university": state.gate.institution_for(email),
        }))
        .into_response(),
        (Some(RejectionReason::RateLimited), _) => {
            let email = candidate.as_text().unwrap_or_default();
            let retry_after = state.gate.retry_after(email, &origin);
            ApiError::rejected(RejectionReason::RateLimited, retry_after).into_response()
        }
        (Some(reason), _) => ApiError::rejected(reason, None).into_response(),
        (None, None) => ApiError::internal().into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct UniversityQuery {
    search: Option<String>,
    limit: Option<String>,
}

impl UniversityQuery {
    /// Page size; anything that is not a whole number falls back to the default.
    fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_UNIVERSITY_LIMIT)
    }
}

async fn list_universities<L: AttemptLimiter + 'static>(
    State(state): State<AppState<L>>,
    Query(query): Query<UniversityQuery>,
) -> Response {
    let directory = state.gate.validator().directory();
    let matches = directory.search(query.search.as_deref().unwrap_or_default());
    let total = matches.len();
    let limit = query.limit();
    let universities: Vec<_> = matches.into_iter().take(limit).collect();

    Json(serde_json::json!({
        "universities": universities,
        "total": total,
    }))
    .into_response()
}

async fn get_university<L: AttemptLimiter + 'static>(
    State(state): State<AppState<L>>,
    Path(slug): Path<String>,
) -> Response {
    match state.gate.validator().directory().by_slug(&slug) {
        Some(campus) => Json(campus).into_response(),
        None => ApiError::not_found(UNIVERSITY_NOT_FOUND_MESSAGE).into_response(),
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "auth-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics() -> Response {
    match encode_metrics() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            ApiError::internal().into_response()
        }
    }
}
