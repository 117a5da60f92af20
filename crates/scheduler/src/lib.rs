//! Round-robin CPU scheduling simulator library.
//!
//! This crate replays a fixed, fully known workload on a single simulated CPU
//! under a round-robin policy, one tick at a time. It provides:
//! 1. **Common:** Time and identifier types plus the crate-wide error enum.
//! 2. **Configuration:** Report and tracing options, deserializable from JSON.
//! 3. **Simulation:** Workload loader, ready queue, process run-state, and the tick loop.
//! 4. **Statistics:** Average waiting, response, and turnaround times.

/// Common types (ticks, process ids) and error definitions.
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Workload loading and the round-robin simulator.
pub mod sim;
/// Schedule statistics aggregation and reporting.
pub mod stats;

/// Crate-wide error type; every fallible operation returns it.
pub use crate::common::error::{Result, SimError};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main simulator type; owns the run-state arena and the ready queue.
pub use crate::sim::simulator::{Simulator, simulate};
/// Aggregated metrics for a finished schedule.
pub use crate::stats::ScheduleStats;
