//! # Domain Validation Pipeline
//!
//! Ordered checks over an untrusted candidate. The first failing check wins;
//! all of them surface the same message to the caller.
//!
//! ## Algorithm
//!
//! 1. Candidate must be non-empty text.
//! 2. Trim (whitespace and BOM) and lowercase; must still be non-empty.
//! 3. Basic shape: `local@label.tld`, no whitespace, no stray `@`.
//! 4. Exactly two non-empty `@`-separated segments.
//! 5. Second segment is the candidate domain.
//! 6. Domain must be an exact whitelist member.
//! 7. Domain must be plain ASCII letters/digits/dots/hyphens with no `..`
//!    and no leading/trailing hyphen.
//!
//! Pure and deterministic; safe to share across threads without locking.

use crate::domain::{
    has_suspicious_characters, invariant_whitelist_map_lockstep, is_padding, normalize_address,
    Campus, CampusDirectory, Candidate, DomainWhitelist, RejectionReason, ValidationResult,
};
use std::collections::BTreeMap;
use tracing::error;

/// Classifies candidate addresses against a campus directory.
#[derive(Debug, Clone)]
pub struct DomainValidator {
    directory: CampusDirectory,
    whitelist: DomainWhitelist,
    institutions: BTreeMap<String, String>,
}

impl DomainValidator {
    /// Build a validator whose whitelist and institution map both come from
    /// `directory`.
    pub fn new(directory: CampusDirectory) -> Self {
        let whitelist = directory.whitelist();
        let institutions = directory.institution_map();

        if let Err(e) = invariant_whitelist_map_lockstep(&whitelist, &institutions) {
            error!(error = %e, "Domain whitelist and institution map disagree");
            debug_assert!(false, "domain whitelist and institution map disagree: {e}");
        }

        Self {
            directory,
            whitelist,
            institutions,
        }
    }

    /// Validator for the University of California campuses.
    pub fn uc_system() -> Self {
        Self::new(CampusDirectory::uc_system())
    }

    /// The directory backing this validator.
    pub fn directory(&self) -> &CampusDirectory {
        &self.directory
    }

    /// The exact-match whitelist.
    pub fn whitelist(&self) -> &DomainWhitelist {
        &self.whitelist
    }

    /// Classify `candidate`. Never panics and never fails; every outcome is
    /// a `ValidationResult`.
    pub fn validate<'a>(&self, candidate: impl Into<Candidate<'a>>) -> ValidationResult {
        match self.classify(candidate.into()) {
            Ok(canonical) => ValidationResult::accepted(canonical),
            Err(reason) => ValidationResult::rejected(reason),
        }
    }

    /// Institution slug for an accepted address, `None` otherwise.
    pub fn institution_for<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Option<&str> {
        let result = self.validate(candidate);
        let domain = result.domain()?;

        match self.institutions.get(domain) {
            Some(slug) => Some(slug.as_str()),
            None => {
                // Unreachable while the lockstep invariant holds.
                error!(domain, "Accepted domain has no institution slug");
                debug_assert!(false, "accepted domain {domain} has no institution slug");
                None
            }
        }
    }

    /// Campus record for an accepted address.
    pub fn campus_for<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Option<&Campus> {
        let slug = self.institution_for(candidate)?;
        self.directory.by_slug(slug)
    }

    fn classify(&self, candidate: Candidate<'_>) -> Result<String, RejectionReason> {
        let raw = candidate
            .as_text()
            .filter(|s| !s.is_empty())
            .ok_or(RejectionReason::MalformedInput)?;

        let sanitized = normalize_address(raw);
        if sanitized.is_empty() {
            return Err(RejectionReason::MalformedInput);
        }

        if !has_address_shape(&sanitized) {
            return Err(RejectionReason::ShapeMismatch);
        }

        let (_, domain) = split_address(&sanitized)?;

        if !self.whitelist.contains(domain) {
            return Err(RejectionReason::DomainNotWhitelisted);
        }

        if has_suspicious_characters(domain) {
            return Err(RejectionReason::SuspiciousDomainCharacters);
        }

        Ok(sanitized)
    }
}

impl Default for DomainValidator {
    fn default() -> Self {
        Self::uc_system()
    }
}

/// Shape-only check, no domain whitelist. Case is not significant.
pub fn is_valid_email_format<'a>(candidate: impl Into<Candidate<'a>>) -> bool {
    candidate
        .into()
        .as_text()
        .map(|s| s.trim_matches(is_padding))
        .is_some_and(|s| !s.is_empty() && has_address_shape(s))
}

/// `local@label.tld`: one `@`, both sides free of whitespace and `@`, and the
/// domain side holds a dot with at least one character on each side of it.
fn has_address_shape(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    let clean = |part: &str| !part.is_empty() && !part.chars().any(|c| is_padding(c) || c == '@');
    if !clean(local) || !clean(domain) {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + c.len_utf8() < domain.len())
}

/// Split into exactly two non-empty segments.
fn split_address(address: &str) -> Result<(&str, &str), RejectionReason> {
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
            Ok((local, domain))
        }
        _ => Err(RejectionReason::MultipleAtSymbols),
    }
}
