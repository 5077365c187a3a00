//! # Campus-Connect Benchmarks
//!
//! Throughput of the two hot paths a sign-up burst exercises.

pub mod cc_01_domain_validator;
pub mod cc_02_abuse_limiter;
