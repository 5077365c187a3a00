//! Gateway configuration with validation.

use cc_02_abuse_limiter::{parse_duration, LimiterConfig, LimiterConfigError};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Abuse limiter configuration
    pub limiter: LimiterConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            limiter: LimiterConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Defaults overlaid with environment variables, then validated.
    ///
    /// # Environment Variables
    ///
    /// - `CC_HTTP_HOST`: Bind address (default: 0.0.0.0)
    /// - `CC_HTTP_PORT`: Port (default: 3000)
    /// - `CC_MAX_ATTEMPTS`: Failures before a block (default: 5)
    /// - `CC_WINDOW`: Failure window, e.g. `15m` (default: 15m)
    /// - `CC_BLOCK_DURATION`: Block period (default: 30m)
    /// - `CC_SWEEP_INTERVAL`: Expired-record sweep period (default: 5m)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("CC_HTTP_HOST") {
            config.http.host = parse_var("CC_HTTP_HOST", &host)?;
        }
        if let Some(port) = lookup("CC_HTTP_PORT") {
            config.http.port = parse_var("CC_HTTP_PORT", &port)?;
        }
        if let Some(attempts) = lookup("CC_MAX_ATTEMPTS") {
            config.limiter.max_attempts = parse_var("CC_MAX_ATTEMPTS", &attempts)?;
        }
        if let Some(window) = lookup("CC_WINDOW") {
            config.limiter.window = duration_var("CC_WINDOW", &window)?;
        }
        if let Some(block) = lookup("CC_BLOCK_DURATION") {
            config.limiter.block_duration = duration_var("CC_BLOCK_DURATION", &block)?;
        }
        if let Some(sweep) = lookup("CC_SWEEP_INTERVAL") {
            config.limiter.sweep_interval = duration_var("CC_SWEEP_INTERVAL", &sweep)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        self.limiter.validate()?;
        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 3000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Port 0 would bind an ephemeral port
    #[error("http port cannot be 0")]
    InvalidPort,
    /// Environment variable present but unparseable
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
    /// Limiter section rejected
    #[error("invalid limiter configuration: {0}")]
    Limiter(#[from] LimiterConfigError),
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

fn duration_var(var: &'static str, value: &str) -> Result<std::time::Duration, ConfigError> {
    parse_duration(value).map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}
