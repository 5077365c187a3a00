//! # Domain Errors
//!
//! Rejection taxonomy and directory construction errors.

use thiserror::Error;

/// Message returned for every validator-level rejection.
pub const UNIFORM_REJECTION_MESSAGE: &str = "Invalid email domain. Institutional emails only.";

/// Message returned while the abuse limiter holds a key blocked.
pub const RATE_LIMITED_MESSAGE: &str = "Too many failed attempts. Please try again later.";

/// Why a candidate address was rejected.
///
/// Kept for logs and metrics only. Callers see `user_message()`, which is
/// identical for every variant except `RateLimited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RejectionReason {
    /// Missing, empty or non-text candidate.
    #[error("malformed input")]
    MalformedInput,

    /// Fails the basic `local@domain.tld` shape.
    #[error("address shape mismatch")]
    ShapeMismatch,

    /// More or fewer than one `@`.
    #[error("multiple @ symbols")]
    MultipleAtSymbols,

    /// Domain is not byte-for-byte equal to a whitelist entry.
    #[error("domain not whitelisted")]
    DomainNotWhitelisted,

    /// Non-ASCII, double-dot or hyphen-boundary anomaly in the domain.
    #[error("suspicious domain characters")]
    SuspiciousDomainCharacters,

    /// Abuse limiter block in effect.
    #[error("rate limited")]
    RateLimited,
}

impl RejectionReason {
    /// Text surfaced verbatim to the end user.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::RateLimited => RATE_LIMITED_MESSAGE,
            _ => UNIFORM_REJECTION_MESSAGE,
        }
    }

    /// Stable snake_case label for metrics.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::MalformedInput => "malformed_input",
            Self::ShapeMismatch => "shape_mismatch",
            Self::MultipleAtSymbols => "multiple_at_symbols",
            Self::DomainNotWhitelisted => "domain_not_whitelisted",
            Self::SuspiciousDomainCharacters => "suspicious_domain_characters",
            Self::RateLimited => "rate_limited",
        }
    }
}

/// Errors raised while building a campus directory or whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Whitelist entry is not a plain lowercase domain.
    #[error("invalid whitelist domain: {0:?}")]
    InvalidDomain(String),

    /// Slug is empty or has characters outside `[a-z0-9-]`.
    #[error("invalid institution slug: {0:?}")]
    InvalidSlug(String),

    /// Two campuses claim the same domain.
    #[error("duplicate domain: {0}")]
    DuplicateDomain(String),

    /// Two campuses claim the same slug.
    #[error("duplicate slug: {0}")]
    DuplicateSlug(String),

    /// Whitelist and institution map disagree.
    #[error("whitelist and institution map out of step: {0}")]
    Inconsistent(String),
}
