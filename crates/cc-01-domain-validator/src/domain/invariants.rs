//! # Domain Invariants
//!
//! Business rules that must always hold true for the validator.

use super::errors::DirectoryError;
use super::value_objects::DomainWhitelist;
use std::collections::BTreeMap;

/// Invariant: every whitelist domain has exactly one slug and the map has no
/// domain the whitelist lacks.
///
/// A violation is a programming error, not a user-facing one.
pub fn invariant_whitelist_map_lockstep(
    whitelist: &DomainWhitelist,
    institutions: &BTreeMap<String, String>,
) -> Result<(), DirectoryError> {
    for domain in whitelist.iter() {
        if !institutions.contains_key(domain) {
            return Err(DirectoryError::Inconsistent(format!(
                "whitelisted domain {domain} has no institution slug"
            )));
        }
    }

    if let Some(extra) = institutions.keys().find(|d| !whitelist.contains(d)) {
        return Err(DirectoryError::Inconsistent(format!(
            "institution map names unlisted domain {extra}"
        )));
    }

    Ok(())
}
