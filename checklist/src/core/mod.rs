//! Deterministic, pure logic for the prerequisite checklist.
//!
//! Core modules must be free of I/O side effects. They operate on the
//! in-memory course graph and approval set and return deterministic outputs
//! suitable for tests.

pub mod engine;
pub mod graph;
pub mod invariants;
pub mod types;
