//! CC-03 Auth Gateway - the guarded email check and its HTTP surface.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     AUTH GATEWAY (cc-03)                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /api/auth/validate-email     GET /api/universities[/:slug]
//! │              │                                  │            │
//! │  ┌───────────┴───────────┐                      │            │
//! │  │ TracingLayer + origin │                      │            │
//! │  └───────────┬───────────┘                      │            │
//! │              │                                  │            │
//! │  ┌───────────┴────────────────┐       ┌─────────┴─────────┐  │
//! │  │ EmailGate::guard           │       │  CampusDirectory  │  │
//! │  │   limiter → validator      │──────→│  (cc-01)          │  │
//! │  └───────────┬────────────────┘       └───────────────────┘  │
//! │              │                                               │
//! │  ┌───────────┴────────────────┐                              │
//! │  │ AttemptLimiter (cc-02)     │←── sweep_task (periodic)     │
//! │  └────────────────────────────┘                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use cc_03_auth_gateway::{AuthGatewayService, GatewayConfig};
//!
//! let service = AuthGatewayService::new(GatewayConfig::from_env()?)?;
//! service.serve(shutdown_signal()).await?;
//! ```
//!
//! # Security
//!
//! - Every rejection carries the same message, whichever rule fired
//! - Failures are counted per (email, client origin); five in fifteen
//!   minutes block that pair for thirty minutes
//! - Rejections are logged on the `campus::security` target with the
//!   address masked

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod gate;
pub mod middleware;
pub mod routes;
pub mod service;

pub use domain::{ApiError, ConfigError, GatewayConfig, GatewayError, HttpConfig};
pub use gate::{EmailGate, SECURITY_LOG_TARGET};
pub use routes::{build_router, AppState, DEFAULT_UNIVERSITY_LIMIT};
pub use service::{sweep_task, AuthGatewayService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
