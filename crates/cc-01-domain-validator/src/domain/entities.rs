//! # Domain Entities
//!
//! Campuses and the directory that owns them.
//!
//! The directory is the single source for both the domain whitelist and the
//! domain→institution map, so the two cannot drift apart.

use super::errors::DirectoryError;
use super::value_objects::{is_well_formed_domain, DomainWhitelist};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A supported university campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campus {
    /// Stable record identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Institution slug used to partition the rest of the application.
    pub slug: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// Public website.
    pub website: String,
    /// Institution type ("Public").
    #[serde(rename = "type")]
    pub kind: String,
    /// Institutional email domain (exactly one per campus).
    pub domain: String,
}

impl Campus {
    fn uc(id: &str, name: &str, slug: &str, city: &str, domain: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            city: city.to_string(),
            state: "CA".to_string(),
            website: format!("https://{domain}"),
            kind: "Public".to_string(),
            domain: domain.to_string(),
        }
    }
}

/// Ordered collection of campuses with lookup by slug and domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusDirectory {
    campuses: Vec<Campus>,
}

impl CampusDirectory {
    /// Build a directory, checking slugs and domains are well formed and unique.
    pub fn new(campuses: Vec<Campus>) -> Result<Self, DirectoryError> {
        let mut slugs = HashSet::new();
        let mut domains = HashSet::new();

        for campus in &campuses {
            if !is_valid_slug_format(&campus.slug) {
                return Err(DirectoryError::InvalidSlug(campus.slug.clone()));
            }
            if !is_well_formed_domain(&campus.domain) {
                return Err(DirectoryError::InvalidDomain(campus.domain.clone()));
            }
            if !slugs.insert(campus.slug.as_str()) {
                return Err(DirectoryError::DuplicateSlug(campus.slug.clone()));
            }
            if !domains.insert(campus.domain.as_str()) {
                return Err(DirectoryError::DuplicateDomain(campus.domain.clone()));
            }
        }

        Ok(Self { campuses })
    }

    /// The ten University of California campuses.
    pub fn uc_system() -> Self {
        Self {
            campuses: vec![
                Campus::uc("uc-berkeley", "University of California, Berkeley", "berkeley", "Berkeley", "berkeley.edu"),
                Campus::uc("ucla", "University of California, Los Angeles", "ucla", "Los Angeles", "ucla.edu"),
                Campus::uc("uc-san-diego", "University of California, San Diego", "ucsd", "La Jolla", "ucsd.edu"),
                Campus::uc("uc-davis", "University of California, Davis", "davis", "Davis", "ucdavis.edu"),
                Campus::uc("uc-irvine", "University of California, Irvine", "uci", "Irvine", "uci.edu"),
                Campus::uc("uc-merced", "University of California, Merced", "merced", "Merced", "ucmerced.edu"),
                Campus::uc("uc-riverside", "University of California, Riverside", "riverside", "Riverside", "ucr.edu"),
                Campus::uc("ucsf", "University of California, San Francisco", "ucsf", "San Francisco", "ucsf.edu"),
                Campus::uc("uc-santa-barbara", "University of California, Santa Barbara", "ucsb", "Santa Barbara", "ucsb.edu"),
                Campus::uc("uc-santa-cruz", "University of California, Santa Cruz", "ucsc", "Santa Cruz", "ucsc.edu"),
            ],
        }
    }

    /// All campuses in directory order.
    pub fn campuses(&self) -> &[Campus] {
        &self.campuses
    }

    /// Number of campuses.
    pub fn len(&self) -> usize {
        self.campuses.len()
    }

    /// True if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.campuses.is_empty()
    }

    /// Find a campus by slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Campus> {
        self.campuses.iter().find(|c| c.slug == slug)
    }

    /// Find a campus by its email domain.
    pub fn by_domain(&self, domain: &str) -> Option<&Campus> {
        self.campuses.iter().find(|c| c.domain == domain)
    }

    /// Slugs in directory order.
    pub fn all_slugs(&self) -> Vec<&str> {
        self.campuses.iter().map(|c| c.slug.as_str()).collect()
    }

    /// Whether `slug` names a known campus.
    pub fn is_valid_slug(&self, slug: &str) -> bool {
        self.by_slug(slug).is_some()
    }

    /// Case-insensitive substring search over name, slug and city.
    /// An empty query returns every campus.
    pub fn search(&self, query: &str) -> Vec<&Campus> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.campuses.iter().collect();
        }
        self.campuses
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.slug.contains(&needle)
                    || c.city.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Exact-match whitelist of every campus domain.
    pub fn whitelist(&self) -> DomainWhitelist {
        // Domains were checked in `new`, or are the static UC set.
        DomainWhitelist::from_checked(self.campuses.iter().map(|c| c.domain.clone()))
    }

    /// Domain → institution slug map.
    pub fn institution_map(&self) -> BTreeMap<String, String> {
        self.campuses
            .iter()
            .map(|c| (c.domain.clone(), c.slug.clone()))
            .collect()
    }
}

impl Default for CampusDirectory {
    fn default() -> Self {
        Self::uc_system()
    }
}

fn is_valid_slug_format(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
