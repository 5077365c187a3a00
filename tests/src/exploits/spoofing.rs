//! # Domain Spoofing
//!
//! Attack: get a non-institutional mailbox accepted by dressing it up as a
//! campus domain.
//!
//! | Technique | Example |
//! |-----------|---------|
//! | Subdomain prefix | `x@mail.berkeley.edu` |
//! | Suffix append | `x@berkeley.edu.evil.com` |
//! | Look-alike TLD | `x@berkeley.com` |
//! | Homograph | `x@berkеley.edu` (Cyrillic е) |
//! | Smuggled `@` | `x@berkeley.edu@evil.com` |
//! | Padding tricks | `x@ berkeley.edu`, `x@berkeley.edu.` |
//!
//! Defense: exact whitelist match after trim/lowercase, single `@`, ASCII
//! domain character set.

#[cfg(test)]
mod tests {
    use cc_01_domain_validator::{CampusDirectory, DomainValidator, UNIFORM_REJECTION_MESSAGE};

    fn spoofs_for(domain: &str) -> Vec<String> {
        let (label, _) = domain.split_once('.').unwrap_or((domain, ""));
        vec![
            format!("x@mail.{domain}"),
            format!("x@{domain}.evil.com"),
            format!("x@{domain}.co"),
            format!("x@{label}.com"),
            format!("x@{label}-edu.com"),
            format!("x@{domain}@evil.com"),
            format!("x@evil.com@{domain}"),
            format!("x@@{domain}"),
            format!("x@ {domain}"),
            format!("x@{domain}."),
            format!("x@.{domain}"),
            format!("x@{}", domain.replace('.', "..")),
            format!("x@{}", domain.replacen('e', "\u{0435}", 1)),
            format!("x@{}", domain.replacen('u', "\u{00fc}", 1)),
            format!("x@{domain}\u{200b}"),
        ]
    }

    #[test]
    fn test_every_campus_domain_resists_spoofing() {
        let validator = DomainValidator::uc_system();
        for campus in CampusDirectory::uc_system().campuses() {
            for spoof in spoofs_for(&campus.domain) {
                let result = validator.validate(spoof.as_str());
                assert!(!result.is_valid(), "accepted spoof {spoof:?}");
                assert_eq!(result.error(), Some(UNIFORM_REJECTION_MESSAGE), "{spoof:?}");
                assert_eq!(validator.institution_for(spoof.as_str()), None);
            }
        }
    }

    #[test]
    fn test_case_and_padding_are_not_spoofs() {
        let validator = DomainValidator::uc_system();
        for raw in ["X@UCLA.EDU", "\tx@ucla.edu\n", "  x@UcLa.EdU  "] {
            assert_eq!(
                validator.validate(raw).sanitized_email(),
                Some("x@ucla.edu"),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_oversized_input_is_rejected_without_panic() {
        let validator = DomainValidator::uc_system();
        let huge_local = format!("{}@berkeley.edu", "a".repeat(100_000));
        let huge_domain = format!("x@{}berkeley.edu", "a.".repeat(50_000));
        let many_ats = "@".repeat(10_000);

        assert!(!validator.validate(huge_domain.as_str()).is_valid());
        assert!(!validator.validate(many_ats.as_str()).is_valid());
        // Local part length is not policed; only the domain is.
        let _ = validator.validate(huge_local.as_str());
    }
}
