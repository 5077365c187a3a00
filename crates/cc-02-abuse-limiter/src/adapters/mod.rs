//! Adapters (Hexagonal Architecture - Outer Layer)

pub mod in_memory;

pub use in_memory::InMemoryLimiter;
