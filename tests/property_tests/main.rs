//! Property-based tests for dashboard invariants
//!
//! Generators and properties for the keyword classifier, the simulated
//! backends and the bounded histories the dashboard keeps.

mod classifier_invariants;
mod history_invariants;
