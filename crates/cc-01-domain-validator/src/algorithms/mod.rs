//! # Algorithms
//!
//! The validation pipeline and log-safe address rendering.

pub mod masking;
pub mod validate;

pub use masking::mask_email;
pub use validate::{is_valid_email_format, DomainValidator};
