//! Limiter configuration errors.

use thiserror::Error;

/// Errors raised while loading or validating a `LimiterConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimiterConfigError {
    /// `max_attempts` must allow at least one failure.
    #[error("max_attempts cannot be 0")]
    ZeroAttempts,

    /// A duration field was zero.
    #[error("{0} cannot be 0")]
    ZeroDuration(&'static str),

    /// A duration string could not be parsed.
    #[error("invalid duration {0:?}: expected e.g. \"15m\", \"30s\", \"500ms\" or plain seconds")]
    InvalidDuration(String),
}
