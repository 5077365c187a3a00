//! # CC-02 Abuse Limiter Benchmarks
//!
//! - Hot-key failure recording (one attacker hammering one key)
//! - Wide key spread (many origins, one failure each)
//! - Contended recording across threads
//! - Sweep over a large expired population

use cc_02_abuse_limiter::{AttemptLimiter, InMemoryLimiter, LimitKey, LimiterConfig, MockTimeSource};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

fn keys(count: usize) -> Vec<LimitKey> {
    (0..count)
        .map(|i| {
            LimitKey::derive(
                &format!("user{i}@gmail.com"),
                &format!("10.{}.{}.{}", (i >> 16) & 0xff, (i >> 8) & 0xff, i & 0xff),
            )
        })
        .collect()
}

/// One key, repeated failures (stays blocked after the fifth).
pub fn bench_hot_key(c: &mut Criterion) {
    let limiter = InMemoryLimiter::default();
    let key = LimitKey::derive("attacker@gmail.com", "203.0.113.7");

    let mut group = c.benchmark_group("cc-02-hot-key");
    group.bench_function("record_failure", |b| {
        b.iter(|| black_box(limiter.record_failure(&key)))
    });
    group.bench_function("is_blocked", |b| b.iter(|| black_box(limiter.is_blocked(&key))));
    group.finish();
}

/// Fresh keys per iteration batch.
pub fn bench_key_spread(c: &mut Criterion) {
    let mut group = c.benchmark_group("cc-02-key-spread");

    for size in [1_000, 10_000] {
        let batch = keys(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| {
                let limiter = InMemoryLimiter::default();
                for key in batch {
                    limiter.record_failure(key);
                }
                limiter.tracked_keys()
            })
        });
    }
    group.finish();
}

/// Eight threads recording against a shared limiter.
pub fn bench_contended(c: &mut Criterion) {
    let batch = Arc::new(keys(64));

    c.bench_function("cc-02-contended-8-threads", |b| {
        b.iter(|| {
            let limiter = Arc::new(InMemoryLimiter::default());
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let limiter = Arc::clone(&limiter);
                    let batch = Arc::clone(&batch);
                    std::thread::spawn(move || {
                        for key in batch.iter() {
                            limiter.record_failure(key);
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
            limiter.tracked_keys()
        })
    });
}

/// Sweep 10k expired records.
pub fn bench_sweep(c: &mut Criterion) {
    let batch = keys(10_000);

    c.bench_function("cc-02-sweep-10k-expired", |b| {
        b.iter(|| {
            let clock = Arc::new(MockTimeSource::new(0));
            let limiter =
                InMemoryLimiter::with_time_source(LimiterConfig::default(), clock.clone());
            for key in &batch {
                limiter.record_failure(key);
            }
            clock.advance_by(Duration::from_secs(15 * 60));
            black_box(limiter.sweep_expired())
        })
    });
}

/// Register all limiter benchmarks.
pub fn register_benchmarks(c: &mut Criterion) {
    bench_hot_key(c);
    bench_key_spread(c);
    bench_contended(c);
    bench_sweep(c);
}
