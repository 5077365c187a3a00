//! Rate-limit records and the observable per-key state.

use super::config::LimiterConfig;
use super::value_objects::Timestamp;
use std::time::Duration;

/// Failure count and window-reset time for one key.
///
/// Owned exclusively by the limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Failures recorded in the active window.
    pub failures: u32,
    /// When the window (or block) ends.
    pub reset_at: Timestamp,
}

impl AttemptRecord {
    /// Fresh record for a first failure at `now`.
    pub fn first_failure(now: Timestamp, config: &LimiterConfig) -> Self {
        let mut record = Self {
            failures: 0,
            reset_at: now,
        };
        record.register_failure(now, config);
        record
    }

    /// True once `now` has reached the reset time.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.reset_at
    }

    /// True while the threshold is met and the record is live.
    pub fn is_blocked(&self, now: Timestamp, config: &LimiterConfig) -> bool {
        !self.is_expired(now) && self.failures >= config.max_attempts
    }

    /// Count one more failure inside a live window.
    ///
    /// The block ratchets once: the failure that reaches the threshold moves
    /// `reset_at` to `now + block_duration`; later failures leave it alone.
    pub fn register_failure(&mut self, now: Timestamp, config: &LimiterConfig) {
        let was_blocked = self.failures >= config.max_attempts;
        self.failures = self.failures.saturating_add(1);

        if was_blocked {
            return;
        }
        if self.failures >= config.max_attempts {
            self.reset_at = now.saturating_add(config.block_ms());
        } else if self.failures == 1 {
            self.reset_at = now.saturating_add(config.window_ms());
        }
    }

    /// Observable state at `now`.
    pub fn state(&self, now: Timestamp, config: &LimiterConfig) -> AttemptState {
        if self.is_expired(now) {
            AttemptState::Clean
        } else if self.failures >= config.max_attempts {
            AttemptState::Blocked {
                failures: self.failures,
                remaining: Duration::from_millis(self.reset_at - now),
            }
        } else {
            AttemptState::Accumulating {
                failures: self.failures,
            }
        }
    }
}

/// Per-key state: `Clean → Accumulating(n) → Blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// No live record.
    Clean,
    /// Failures inside an active window, below the threshold.
    Accumulating {
        /// Failures so far.
        failures: u32,
    },
    /// Threshold reached; rejected until the block expires.
    Blocked {
        /// Failures recorded, including any after the block began.
        failures: u32,
        /// Time left on the block.
        remaining: Duration,
    },
}

impl AttemptState {
    /// True for `Blocked`.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Failures in the active window (0 when clean).
    pub fn failures(&self) -> u32 {
        match self {
            Self::Clean => 0,
            Self::Accumulating { failures } | Self::Blocked { failures, .. } => *failures,
        }
    }
}
