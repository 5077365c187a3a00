//! Domain layer for the Auth Gateway.

pub mod config;
pub mod error;

pub use config::{ConfigError, GatewayConfig, HttpConfig};
pub use error::{
    ApiError, GatewayError, INTERNAL_ERROR_MESSAGE, INVALID_REQUEST_MESSAGE,
    UNIVERSITY_NOT_FOUND_MESSAGE,
};
