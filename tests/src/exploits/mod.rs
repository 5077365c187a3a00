//! # Abuse Simulations
//!
//! Each test plays an attacker against a fresh gate and asserts the attack
//! gains nothing.

pub mod spoofing;
