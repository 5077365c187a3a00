//! Limiter configuration with validation.

use super::errors::LimiterConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Abuse limiter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimiterConfig {
    /// Failures inside one window that trigger a block (default: 5)
    pub max_attempts: u32,
    /// Interval over which failures accumulate (default: 15m)
    #[serde(with = "humantime_serde")]
    pub window: Duration,
    /// Penalty once the threshold is reached (default: 30m)
    #[serde(with = "humantime_serde")]
    pub block_duration: Duration,
    /// How often the host should call `sweep_expired` (default: 5m)
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(15 * 60),
            block_duration: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
        }
    }
}

impl LimiterConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), LimiterConfigError> {
        if self.max_attempts == 0 {
            return Err(LimiterConfigError::ZeroAttempts);
        }
        if self.window.is_zero() {
            return Err(LimiterConfigError::ZeroDuration("window"));
        }
        if self.block_duration.is_zero() {
            return Err(LimiterConfigError::ZeroDuration("block_duration"));
        }
        if self.sweep_interval.is_zero() {
            return Err(LimiterConfigError::ZeroDuration("sweep_interval"));
        }
        Ok(())
    }

    pub(crate) fn window_ms(&self) -> u64 {
        duration_ms(self.window)
    }

    pub(crate) fn block_ms(&self) -> u64 {
        duration_ms(self.block_duration)
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Parse a human-readable duration: `"500ms"`, `"30s"`, `"15m"`, `"2h"` or
/// plain seconds.
pub fn parse_duration(s: &str) -> Result<Duration, LimiterConfigError> {
    let trimmed = s.trim();
    let invalid = || LimiterConfigError::InvalidDuration(s.to_string());

    let (digits, unit_ms): (&str, u64) = if let Some(ms) = trimmed.strip_suffix("ms") {
        (ms, 1)
    } else if let Some(secs) = trimmed.strip_suffix('s') {
        (secs, 1_000)
    } else if let Some(mins) = trimmed.strip_suffix('m') {
        (mins, 60_000)
    } else if let Some(hours) = trimmed.strip_suffix('h') {
        (hours, 3_600_000)
    } else {
        (trimmed, 1_000)
    };

    let value: u64 = digits.trim().parse().map_err(|_| invalid())?;
    value
        .checked_mul(unit_ms)
        .map(Duration::from_millis)
        .ok_or_else(invalid)
}

/// Render a duration in the largest whole unit `parse_duration` accepts.
pub fn format_duration(d: Duration) -> String {
    let ms = duration_ms(d);
    if ms % 1_000 != 0 {
        format!("{ms}ms")
    } else if ms != 0 && ms % 3_600_000 == 0 {
        format!("{}h", ms / 3_600_000)
    } else if ms != 0 && ms % 60_000 == 0 {
        format!("{}m", ms / 60_000)
    } else {
        format!("{}s", ms / 1_000)
    }
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_duration(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
