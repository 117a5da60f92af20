//! Common utilities and types used throughout the scheduling simulator.
//!
//! This module provides the building blocks shared by every other part of the crate:
//! 1. **Time Types:** Tick counts, process identifiers, and the validated quantum length.
//! 2. **Error Handling:** The error enum and its mapping to process exit codes.

/// Error types and exit-code mapping.
pub mod error;

/// Tick, process identifier, and quantum types.
pub mod time;

pub use error::{Result, SimError};
pub use time::{Pid, Quantum, Ticks};
