//! # CC-01 Domain Validator
//!
//! Institutional email classification for the campus application.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD), pure domain - no ports needed
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Decide whether a candidate address belongs to an approved university
//! domain, reject look-alike and spoofed variants, and route an accepted
//! address to its institution slug.
//!
//! ## Validation Pipeline
//!
//! The first failing check decides the outcome. Every check renders the same
//! user-facing message so a caller probing the whitelist learns nothing about
//! which rule fired.
//!
//! ```text
//! candidate ──→ [1 text?] ──→ [2 trim+lower] ──→ [3 shape] ──→ [4 one @]
//!                                                                  │
//!            accept ←── [7 charset] ←── [6 exact whitelist] ←── [5 domain]
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Exact-match whitelist, no suffix/prefix matching | `DomainWhitelist::contains` |
//! | Whitelist and institution map in lockstep | `invariant_whitelist_map_lockstep` |
//! | Validator is total (never panics on input) | `DomainValidator::validate` |
//!
//! ## Module Structure
//!
//! ```text
//! cc-01-domain-validator/
//! ├── domain/          # Campus, CampusDirectory, DomainWhitelist, ValidationResult
//! └── algorithms/      # DomainValidator pipeline, address masking
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::{is_valid_email_format, mask_email, DomainValidator};
pub use domain::{
    has_suspicious_characters, invariant_whitelist_map_lockstep, is_padding, normalize_address,
    Campus, CampusDirectory, Candidate, DirectoryError, DomainWhitelist, RejectionReason,
    ValidationResult, RATE_LIMITED_MESSAGE, UNIFORM_REJECTION_MESSAGE,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
