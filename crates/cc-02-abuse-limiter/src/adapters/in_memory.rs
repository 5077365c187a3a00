//! In-process attempt limiter backed by `DashMap`.
//!
//! Records live for the life of the process and are not shared between
//! instances.

use crate::domain::{AttemptRecord, AttemptState, LimitKey, LimiterConfig};
use crate::ports::{AttemptLimiter, SystemTimeSource, TimeSource};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Attempt limiter state shared across requests
pub struct InMemoryLimiter {
    /// Per-key attempt records
    records: DashMap<LimitKey, AttemptRecord>,
    /// Configuration
    config: LimiterConfig,
    /// Clock for window arithmetic
    clock: Arc<dyn TimeSource>,
}

impl InMemoryLimiter {
    /// Limiter on the monotonic system clock.
    pub fn new(config: LimiterConfig) -> Self {
        Self::with_time_source(config, Arc::new(SystemTimeSource::new()))
    }

    /// Limiter on an injected clock.
    pub fn with_time_source(config: LimiterConfig, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            records: DashMap::new(),
            config,
            clock,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }
}

impl Default for InMemoryLimiter {
    fn default() -> Self {
        Self::new(LimiterConfig::default())
    }
}

impl fmt::Debug for InMemoryLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryLimiter")
            .field("tracked_keys", &self.records.len())
            .field("config", &self.config)
            .finish()
    }
}

impl AttemptLimiter for InMemoryLimiter {
    fn is_blocked(&self, key: &LimitKey) -> bool {
        let now = self.clock.now();

        if self
            .records
            .remove_if(key, |_, record| record.is_expired(now))
            .is_some()
        {
            debug!(origin = key.origin(), "Evicted expired attempt record");
            return false;
        }

        self.records
            .get(key)
            .is_some_and(|record| record.is_blocked(now, &self.config))
    }

    fn record_failure(&self, key: &LimitKey) -> AttemptState {
        let now = self.clock.now();

        let state = match self.records.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                if record.is_expired(now) {
                    *record = AttemptRecord::first_failure(now, &self.config);
                } else {
                    record.register_failure(now, &self.config);
                }
                record.state(now, &self.config)
            }
            Entry::Vacant(vacant) => {
                let record = AttemptRecord::first_failure(now, &self.config);
                vacant.insert(record).state(now, &self.config)
            }
        };

        match state {
            AttemptState::Blocked { failures, remaining } if failures == self.config.max_attempts => {
                warn!(
                    origin = key.origin(),
                    failures,
                    block_secs = remaining.as_secs(),
                    "Attempt key blocked"
                );
            }
            _ => {
                debug!(
                    origin = key.origin(),
                    failures = state.failures(),
                    "Recorded failed attempt"
                );
            }
        }

        state
    }

    fn record_success(&self, key: &LimitKey) {
        if let Some((_, record)) = self.records.remove(key) {
            debug!(
                origin = key.origin(),
                cleared = record.failures,
                "Cleared attempt record after success"
            );
        }
    }

    fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;

        self.records.retain(|_, record| {
            let keep = !record.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        if removed > 0 {
            debug!(
                removed,
                remaining = self.records.len(),
                "Swept expired attempt records"
            );
        }
        removed
    }

    fn state(&self, key: &LimitKey) -> AttemptState {
        let now = self.clock.now();
        self.records
            .get(key)
            .map_or(AttemptState::Clean, |record| record.state(now, &self.config))
    }

    fn tracked_keys(&self) -> usize {
        self.records.len()
    }
}
