//! # Email Gate
//!
//! The composite check every caller goes through:
//!
//! ```text
//! guard(candidate, origin)
//!   │
//!   ├─ limiter.is_blocked(key)? ──yes──→ RateLimited
//!   │
//!   ├─ validator.validate(candidate)
//!   │     ├─ rejected → limiter.record_failure(key) → rejection
//!   │     └─ accepted → limiter.record_success(key) → acceptance
//! ```
//!
//! `key` is the normalized candidate text plus the client origin. Every
//! rejection, including rate limiting, is logged on the `campus::security`
//! target with the address masked.

use campus_telemetry::{
    metric_inc, time_histogram, AUTH_REJECTIONS, AUTH_VALIDATIONS, GUARD_DURATION,
    LIMITER_SWEPT, LIMITER_TRACKED_KEYS,
};
use cc_01_domain_validator::{
    mask_email, Campus, Candidate, DomainValidator, RejectionReason, ValidationResult,
};
use cc_02_abuse_limiter::{AttemptLimiter, InMemoryLimiter, LimitKey, LimiterConfig};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Log target for rejection events.
pub const SECURITY_LOG_TARGET: &str = "campus::security";

/// Validator plus abuse limiter behind a single `guard` call.
pub struct EmailGate<L: AttemptLimiter = InMemoryLimiter> {
    validator: DomainValidator,
    limiter: Arc<L>,
}

impl EmailGate<InMemoryLimiter> {
    /// UC validator with an in-memory limiter on the system clock.
    pub fn in_memory(config: LimiterConfig) -> Self {
        Self::new(DomainValidator::uc_system(), Arc::new(InMemoryLimiter::new(config)))
    }
}

impl<L: AttemptLimiter> EmailGate<L> {
    /// Compose a validator and a limiter.
    pub fn new(validator: DomainValidator, limiter: Arc<L>) -> Self {
        Self { validator, limiter }
    }

    /// The validator.
    pub fn validator(&self) -> &DomainValidator {
        &self.validator
    }

    /// Shared handle to the limiter.
    pub fn limiter(&self) -> Arc<L> {
        Arc::clone(&self.limiter)
    }

    /// Rate-limited validation.
    ///
    /// Never fails. A blocked key gets `RateLimited` without the candidate
    /// being validated at all.
    pub fn guard<'a>(&self, candidate: impl Into<Candidate<'a>>, origin: &str) -> ValidationResult {
        let _timer = time_histogram!(GUARD_DURATION);
        let candidate = candidate.into();
        let key = LimitKey::derive(candidate.as_text().unwrap_or_default(), origin);

        let result = if self.limiter.is_blocked(&key) {
            ValidationResult::rejected(RejectionReason::RateLimited)
        } else {
            let result = self.validator.validate(candidate);
            if result.is_valid() {
                self.limiter.record_success(&key);
            } else {
                self.limiter.record_failure(&key);
            }
            result
        };

        match result.reason() {
            None => {
                metric_inc!(AUTH_VALIDATIONS, &["accepted"]);
                debug!(origin = key.origin(), "Email accepted");
            }
            Some(reason) => {
                let outcome = if reason == RejectionReason::RateLimited {
                    "rate_limited"
                } else {
                    "rejected"
                };
                metric_inc!(AUTH_VALIDATIONS, &[outcome]);
                metric_inc!(AUTH_REJECTIONS, &[reason.as_label()]);
                log_rejection(candidate, reason, key.origin());
            }
        }
        LIMITER_TRACKED_KEYS.set(self.limiter.tracked_keys() as f64);

        result
    }

    /// Institution slug for an accepted address. Does not touch the limiter.
    pub fn institution_for<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Option<&str> {
        self.validator.institution_for(candidate)
    }

    /// Campus record for an accepted address.
    pub fn campus_for<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Option<&Campus> {
        self.validator.campus_for(candidate)
    }

    /// Time left on the block for `email` from `origin`, if blocked.
    pub fn retry_after(&self, email: &str, origin: &str) -> Option<Duration> {
        self.limiter.retry_after(&LimitKey::derive(email, origin))
    }

    /// Drop expired limiter records; returns how many went.
    pub fn sweep_expired(&self) -> usize {
        let removed = self.limiter.sweep_expired();
        LIMITER_SWEPT.inc_by(removed as f64);
        LIMITER_TRACKED_KEYS.set(self.limiter.tracked_keys() as f64);
        removed
    }
}

/// Fire-and-forget security log line for one rejection.
fn log_rejection(candidate: Candidate<'_>, reason: RejectionReason, origin: &str) {
    let email = candidate.as_text().map_or_else(|| "<none>".to_string(), mask_email);
    warn!(
        target: SECURITY_LOG_TARGET,
        at = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        email = %email,
        reason = reason.as_label(),
        origin,
        "Email validation rejected"
    );
}
