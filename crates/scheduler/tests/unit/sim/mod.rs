//! Simulation tests.


/// Scheduling properties checked over generated workloads.
pub mod properties;
