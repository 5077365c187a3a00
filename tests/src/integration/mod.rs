//! # Integration Tests
//!
//! Validator, limiter and gateway exercised together.

pub mod guard_flows;
