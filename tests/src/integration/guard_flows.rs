//! # Guard Flows
//!
//! Validator (cc-01) and limiter (cc-02) composed by the gate (cc-03),
//! driven on a mock clock.
//!
//! ## Flows Tested:
//!
//! 1. **Accept**: canonical form and institution slug line up
//! 2. **Reject → Block → Expire**: Clean → Accumulating(n) → Blocked → Clean
//! 3. **Success reset**: one acceptance forgives the key
//! 4. **Concurrency**: parallel failures on one key are all counted

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use cc_01_domain_validator::{
        CampusDirectory, DomainValidator, RejectionReason, RATE_LIMITED_MESSAGE,
        UNIFORM_REJECTION_MESSAGE,
    };
    use cc_02_abuse_limiter::{
        AttemptLimiter, AttemptState, InMemoryLimiter, LimitKey, LimiterConfig, MockTimeSource,
    };
    use cc_03_auth_gateway::EmailGate;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ORIGIN: &str = "203.0.113.7";

    fn gate_with_clock() -> (Arc<EmailGate>, Arc<MockTimeSource>) {
        let clock = Arc::new(MockTimeSource::new(0));
        let limiter = InMemoryLimiter::with_time_source(LimiterConfig::default(), clock.clone());
        let gate = EmailGate::new(DomainValidator::uc_system(), Arc::new(limiter));
        (Arc::new(gate), clock)
    }

    // =============================================================================
    // ACCEPTANCE
    // =============================================================================

    #[test]
    fn test_every_campus_accepts_and_routes() {
        let (gate, _) = gate_with_clock();
        for campus in CampusDirectory::uc_system().campuses() {
            let raw = format!("  First.Last@{} ", campus.domain.to_uppercase());
            let result = gate.guard(raw.as_str(), ORIGIN);

            let canonical = format!("first.last@{}", campus.domain);
            assert_eq!(result.sanitized_email(), Some(canonical.as_str()));
            assert_eq!(gate.institution_for(canonical.as_str()), Some(campus.slug.as_str()));
        }
        assert_eq!(gate.limiter().tracked_keys(), 0);
    }

    #[test]
    fn test_uniform_message_for_every_validation_failure() {
        let (gate, _) = gate_with_clock();
        let inputs = [
            "",
            "   ",
            "no-at-sign",
            "user@@berkeley.edu",
            "a@b@berkeley.edu",
            "user@mail.berkeley.edu",
            "user@berkeley.edu.evil.com",
            "user@stanford.edu",
        ];
        for (i, input) in inputs.iter().enumerate() {
            let origin = format!("10.0.0.{i}");
            let result = gate.guard(*input, &origin);
            assert_eq!(result.error(), Some(UNIFORM_REJECTION_MESSAGE), "input {input:?}");
            assert_ne!(result.reason(), Some(RejectionReason::RateLimited));
        }
    }

    // =============================================================================
    // RATE LIMITING LIFECYCLE
    // =============================================================================

    #[test]
    fn test_block_lifecycle() {
        let (gate, clock) = gate_with_clock();
        let limiter = gate.limiter();
        let key = LimitKey::derive("probe@gmail.com", ORIGIN);

        for n in 1..=4 {
            gate.guard("probe@gmail.com", ORIGIN);
            assert_eq!(limiter.state(&key), AttemptState::Accumulating { failures: n });
        }
        gate.guard("probe@gmail.com", ORIGIN);
        assert!(limiter.state(&key).is_blocked());

        // Sixth call short-circuits and does not count as a new failure.
        let sixth = gate.guard("probe@gmail.com", ORIGIN);
        assert_eq!(sixth.error(), Some(RATE_LIMITED_MESSAGE));
        assert_eq!(limiter.state(&key).failures(), 5);

        clock.advance_by(Duration::from_secs(29 * 60));
        assert_eq!(
            gate.guard("probe@gmail.com", ORIGIN).reason(),
            Some(RejectionReason::RateLimited)
        );

        clock.advance_by(Duration::from_secs(60));
        assert_eq!(
            gate.guard("probe@gmail.com", ORIGIN).reason(),
            Some(RejectionReason::DomainNotWhitelisted)
        );
        assert_eq!(limiter.state(&key), AttemptState::Accumulating { failures: 1 });
    }

    #[test]
    fn test_blocked_key_rejects_even_a_whitelisted_address() {
        let (gate, _) = gate_with_clock();
        let key = LimitKey::derive("Real.Student@UCI.edu", ORIGIN);
        let limiter = gate.limiter();
        for _ in 0..5 {
            limiter.record_failure(&key);
        }

        let result = gate.guard("real.student@uci.edu", ORIGIN);
        assert!(!result.is_valid());
        assert_eq!(result.error(), Some(RATE_LIMITED_MESSAGE));
        assert!(gate.retry_after("real.student@uci.edu", ORIGIN).is_some());
    }

    #[test]
    fn test_success_forgives_accumulated_failures() {
        let (gate, _) = gate_with_clock();
        let limiter = gate.limiter();
        let key = LimitKey::derive("jane@ucmerced.edu", ORIGIN);
        for _ in 0..4 {
            limiter.record_failure(&key);
        }

        assert!(gate.guard("jane@ucmerced.edu", ORIGIN).is_valid());
        assert_eq!(limiter.state(&key), AttemptState::Clean);
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn test_window_expiry_between_failures() {
        let (gate, clock) = gate_with_clock();
        for _ in 0..4 {
            gate.guard("slow@gmail.com", ORIGIN);
        }
        clock.advance_by(Duration::from_secs(15 * 60));
        for _ in 0..4 {
            let result = gate.guard("slow@gmail.com", ORIGIN);
            assert_eq!(result.reason(), Some(RejectionReason::DomainNotWhitelisted));
        }
    }

    #[test]
    fn test_sweep_bounds_memory() {
        let (gate, clock) = gate_with_clock();
        for i in 0..100 {
            gate.guard(format!("bot{i}@gmail.com").as_str(), ORIGIN);
        }
        assert_eq!(gate.limiter().tracked_keys(), 100);

        clock.advance_by(Duration::from_secs(15 * 60));
        assert_eq!(gate.sweep_expired(), 100);
        assert_eq!(gate.limiter().tracked_keys(), 0);
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[test]
    fn test_parallel_guards_on_one_key_lose_no_failures() {
        let (gate, _) = gate_with_clock();
        let outcomes = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let outcomes = Arc::clone(&outcomes);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        let reason = gate.guard("race@gmail.com", ORIGIN).reason();
                        outcomes.lock().push(reason);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let outcomes = outcomes.lock();
        assert_eq!(outcomes.len(), 100);
        let counted = outcomes
            .iter()
            .filter(|r| **r == Some(RejectionReason::DomainNotWhitelisted))
            .count();
        let limited = outcomes
            .iter()
            .filter(|r| **r == Some(RejectionReason::RateLimited))
            .count();
        assert_eq!(counted + limited, 100);

        // Every call that got past the block check was recorded.
        let key = LimitKey::derive("race@gmail.com", ORIGIN);
        assert_eq!(gate.limiter().state(&key).failures() as usize, counted);
        assert!(counted >= 5);
        assert!(gate.limiter().is_blocked(&key));
    }

    #[test]
    fn test_parallel_keys_are_independent() {
        let (gate, _) = gate_with_clock();
        let accepted = Arc::new(Mutex::new(0usize));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let gate = Arc::clone(&gate);
                let accepted = Arc::clone(&accepted);
                std::thread::spawn(move || {
                    let origin = format!("10.0.{t}.1");
                    for i in 0..10 {
                        gate.guard(format!("bad{i}@gmail.com").as_str(), &origin);
                        if gate.guard("good@ucsc.edu", &origin).is_valid() {
                            *accepted.lock() += 1;
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(*accepted.lock(), 80);
        assert_eq!(gate.limiter().tracked_keys(), 80);
    }
}
