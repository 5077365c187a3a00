//! Inbound (Driving) port for the abuse limiter.
//!
//! A shared external counter store for multi-instance deployments would
//! implement this same trait.

use crate::domain::{AttemptState, LimitKey};
use std::time::Duration;

/// Keyed failed-attempt limiter.
///
/// Implementations must serialize each read-modify-write per key. No method
/// fails under normal operation and none blocks for unbounded time.
pub trait AttemptLimiter: Send + Sync {
    /// Whether `key` is currently blocked.
    ///
    /// A record whose reset time has passed is evicted as a side effect.
    fn is_blocked(&self, key: &LimitKey) -> bool;

    /// Record one failed attempt and return the resulting state.
    fn record_failure(&self, key: &LimitKey) -> AttemptState;

    /// Forget every failure recorded for `key`.
    fn record_success(&self, key: &LimitKey);

    /// Delete every expired record; returns how many were removed.
    ///
    /// Only bounds memory. Correctness never depends on it being called.
    fn sweep_expired(&self) -> usize;

    /// Current state of `key`, without side effects.
    fn state(&self, key: &LimitKey) -> AttemptState;

    /// Time left on the block for `key`, if blocked.
    fn retry_after(&self, key: &LimitKey) -> Option<Duration> {
        match self.state(key) {
            AttemptState::Blocked { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    /// Number of records currently held, live or stale.
    fn tracked_keys(&self) -> usize;
}
