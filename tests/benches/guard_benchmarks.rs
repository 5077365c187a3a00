//! # Campus-Connect Guard Benchmarks
//!
//! | Subsystem | Path | Target |
//! |-----------|------|--------|
//! | cc-01 Domain Validator | `validate` | < 5µs per candidate |
//! | cc-02 Abuse Limiter | `record_failure` | < 1µs uncontended |
//! | cc-03 Auth Gateway | `guard` | < 10µs per call |

use cc_01_domain_validator::DomainValidator;
use cc_02_abuse_limiter::InMemoryLimiter;
use cc_03_auth_gateway::EmailGate;
use cc_tests::benchmarks::{cc_01_domain_validator, cc_02_abuse_limiter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn bench_validator(c: &mut Criterion) {
    cc_01_domain_validator::register_benchmarks(c);
}

fn bench_limiter(c: &mut Criterion) {
    cc_02_abuse_limiter::register_benchmarks(c);
}

fn bench_guard(c: &mut Criterion) {
    let gate = EmailGate::new(
        DomainValidator::uc_system(),
        Arc::new(InMemoryLimiter::default()),
    );
    let mut group = c.benchmark_group("cc-03-guard");

    group.bench_function("accepted", |b| {
        b.iter(|| black_box(gate.guard(black_box("student@ucdavis.edu"), "10.0.0.1")))
    });
    // Blocked after five calls; measures the short-circuit path.
    group.bench_function("rate_limited", |b| {
        b.iter(|| black_box(gate.guard(black_box("bot@gmail.com"), "10.0.0.2")))
    });
    group.finish();
}

criterion_group!(benches, bench_validator, bench_limiter, bench_guard);
criterion_main!(benches);
