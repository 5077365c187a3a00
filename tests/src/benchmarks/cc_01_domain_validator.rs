//! # CC-01 Domain Validator Benchmarks
//!
//! Sign-up bursts push every candidate through the full pipeline, so the
//! interesting numbers are per-call latency and mixed-batch throughput.

use cc_01_domain_validator::{mask_email, DomainValidator};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};

/// Realistic mix: accepted, spoofed, malformed, oversized.
fn candidate_mix(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| match i % 6 {
            0 => format!("student{i}@berkeley.edu"),
            1 => format!("  Student{i}@UCLA.EDU "),
            2 => format!("user{i}@mail.berkeley.edu"),
            3 => format!("user{i}@berkeley.edu.evil.com"),
            4 => format!("not-an-email-{i}"),
            _ => format!("{}@gmail.com", "x".repeat(i % 200)),
        })
        .collect()
}

/// Single accepted and single rejected candidate.
pub fn bench_single_validation(c: &mut Criterion) {
    let validator = DomainValidator::uc_system();
    let mut group = c.benchmark_group("cc-01-validate-single");

    group.bench_function("accepted", |b| {
        b.iter(|| black_box(validator.validate(black_box("jane.doe@ucsb.edu"))))
    });
    group.bench_function("suffix_spoof", |b| {
        b.iter(|| black_box(validator.validate(black_box("jane@ucsb.edu.attacker.net"))))
    });
    group.finish();
}

/// Mixed batches of increasing size.
pub fn bench_batch_validation(c: &mut Criterion) {
    let validator = DomainValidator::uc_system();
    let mut group = c.benchmark_group("cc-01-validate-batch");

    for size in [100, 1_000, 10_000] {
        let candidates = candidate_mix(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &candidates, |b, batch| {
            b.iter(|| {
                batch
                    .iter()
                    .filter(|c| validator.validate(c.as_str()).is_valid())
                    .count()
            })
        });
    }
    group.finish();
}

/// Masking runs on every rejection log line.
pub fn bench_masking(c: &mut Criterion) {
    c.bench_function("cc-01-mask-email", |b| {
        b.iter(|| black_box(mask_email(black_box("alexander.hamilton@berkeley.edu"))))
    });
}

/// Register all validator benchmarks.
pub fn register_benchmarks(c: &mut Criterion) {
    bench_single_validation(c);
    bench_batch_validation(c);
    bench_masking(c);
}
