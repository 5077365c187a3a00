//! # Value Objects
//!
//! Candidate input, validation outcome and the domain whitelist.

use super::errors::{DirectoryError, RejectionReason};
use serde::Serialize;
use std::collections::BTreeSet;

/// An untrusted candidate address.
///
/// Request handlers receive whatever the client sent; only `Text` can ever be
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// A string value (possibly empty or padded).
    Text(&'a str),
    /// Absent or null.
    Missing,
    /// Number, boolean, object or array.
    NonText,
}

impl<'a> Candidate<'a> {
    /// Borrow the text, if any.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Missing | Self::NonText => None,
        }
    }
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for Candidate<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Candidate<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(Self::Missing, Self::Text)
    }
}

impl<'a> From<&'a serde_json::Value> for Candidate<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::Text(s.as_str()),
            serde_json::Value::Null => Self::Missing,
            _ => Self::NonText,
        }
    }
}

impl<'a> From<Option<&'a serde_json::Value>> for Candidate<'a> {
    fn from(value: Option<&'a serde_json::Value>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

/// Outcome of one validation call.
///
/// Constructed fresh per call and never mutated. Serializes to the three
/// caller-visible fields; the internal reason is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sanitized_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    #[serde(skip)]
    reason: Option<RejectionReason>,
}

impl ValidationResult {
    /// Accepted with its canonical (trimmed, lowercased) form.
    pub fn accepted(canonical: String) -> Self {
        Self {
            is_valid: true,
            sanitized_email: Some(canonical),
            error: None,
            reason: None,
        }
    }

    /// Rejected for `reason`.
    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            is_valid: false,
            sanitized_email: None,
            error: Some(reason.user_message()),
            reason: Some(reason),
        }
    }

    /// Whether the candidate was accepted.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Canonical address, present only when accepted.
    pub fn sanitized_email(&self) -> Option<&str> {
        self.sanitized_email.as_deref()
    }

    /// User-facing rejection message, present only when rejected.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Internal cause of a rejection.
    pub fn reason(&self) -> Option<RejectionReason> {
        self.reason
    }

    /// Domain of an accepted address.
    pub fn domain(&self) -> Option<&str> {
        self.sanitized_email()
            .and_then(|email| email.split_once('@'))
            .map(|(_, domain)| domain)
    }
}

/// Characters stripped from the ends of a candidate and refused inside one:
/// Unicode whitespace plus the byte-order mark, which `char::is_whitespace`
/// does not cover.
pub fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Canonical form of a raw address: padding trimmed, then lowercased.
pub fn normalize_address(raw: &str) -> String {
    raw.trim_matches(is_padding).to_lowercase()
}

/// Returns true if `domain` carries a character outside `[A-Za-z0-9.-]`,
/// two consecutive dots, or a leading/trailing hyphen.
///
/// Non-ASCII letters are caught here, which is what stops Cyrillic
/// look-alikes of Latin domains.
pub fn has_suspicious_characters(domain: &str) -> bool {
    domain
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '.' || c == '-'))
        || domain.contains("..")
        || domain.starts_with('-')
        || domain.ends_with('-')
}

/// Plain lowercase `label.tld` with no wildcard, whitespace or stray dots.
pub(crate) fn is_well_formed_domain(domain: &str) -> bool {
    !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.chars().any(|c| c.is_ascii_uppercase())
        && !has_suspicious_characters(domain)
}

/// Immutable exact-match set of approved domains.
///
/// Membership is byte equality on the normalized entry. There is no
/// wildcard, suffix or prefix matching: `mail.berkeley.edu` and
/// `berkeley.edu.evil.com` are both absent even though `berkeley.edu` is
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainWhitelist {
    domains: BTreeSet<String>,
}

impl DomainWhitelist {
    /// Build from raw entries. Entries are trimmed and lowercased; anything
    /// that is not then a plain domain is refused.
    pub fn new<I, S>(entries: I) -> Result<Self, DirectoryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domains = BTreeSet::new();
        for entry in entries {
            let normalized = entry.as_ref().trim().to_lowercase();
            if !is_well_formed_domain(&normalized) {
                return Err(DirectoryError::InvalidDomain(entry.as_ref().to_string()));
            }
            if !domains.insert(normalized.clone()) {
                return Err(DirectoryError::DuplicateDomain(normalized));
            }
        }
        Ok(Self { domains })
    }

    pub(crate) fn from_checked<I>(domains: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            domains: domains.into_iter().collect(),
        }
    }

    /// Exact membership test.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }
}
