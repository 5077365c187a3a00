//! # Abuse Limiter Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Keyed failed-attempt counter consulted before and updated after every
//! domain validation, to blunt enumeration and credential-stuffing against
//! the validator.
//!
//! ## Key State Machine
//!
//! ```text
//!            failure            failure (n == max)
//! [Clean] ──────────→ [Accumulating(n)] ──────────→ [Blocked]
//!    ↑                        │                         │
//!    └──── success / window expiry ─────────────────────┘
//!    └──────────────── success / block expiry ──────────┘
//! ```
//!
//! | Event | Effect |
//! |-------|--------|
//! | First failure, or failure after expiry | `failures = 1`, `reset_at = now + window` |
//! | Failure inside active window | `failures += 1`; on reaching max, `reset_at = now + block` |
//! | Failure while blocked | count only; `reset_at` never moves |
//! | Success | record deleted |
//! | `now >= reset_at` | record is stale; evicted lazily or by sweep |
//!
//! ## Concurrency
//!
//! Every read-modify-write on a key runs under the `DashMap` shard lock for
//! that key. The sweep uses `retain`, which takes the same locks, so it cannot
//! race a concurrent failure reviving the key.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/in_memory.rs - InMemoryLimiter (DashMap)              │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - AttemptLimiter trait                       │
//! │  ports/outbound.rs - TimeSource trait                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/config.rs        - LimiterConfig                        │
//! │  domain/entities.rs      - AttemptRecord, AttemptState          │
//! │  domain/value_objects.rs - LimitKey                             │
//! │  domain/errors.rs        - LimiterConfigError                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryLimiter;
pub use domain::{
    parse_duration, AttemptRecord, AttemptState, LimitKey, LimiterConfig, LimiterConfigError,
    Timestamp, UNKNOWN_ORIGIN,
};
pub use ports::{AttemptLimiter, SystemTimeSource, TimeSource};

#[cfg(any(test, feature = "test-utils"))]
pub use ports::MockTimeSource;
