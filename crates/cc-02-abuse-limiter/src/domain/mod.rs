//! Domain layer for the abuse limiter.

pub mod config;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use value_objects::*;
