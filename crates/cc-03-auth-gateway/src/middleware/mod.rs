//! Middleware for the Auth Gateway.
//!
//! Layer order: Request → Tracing → Handler. Rate limiting is not a layer
//! here; it is part of the email guard itself.

pub mod origin;
pub mod tracing;

pub use origin::client_origin;
pub use tracing::TracingLayer;
