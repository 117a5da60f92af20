//! Workload loading and round-robin simulation.
//!
//! Provides the loader that turns an input file into process descriptors, the
//! per-process run-state, the ready queue, and the tick-driven simulator that
//! ties them together.

pub mod events;
pub mod loader;
pub mod process;
pub mod queue;
pub mod simulator;

pub use events::SchedEvent;
pub use process::{ProcessDescriptor, ProcessOutcome, ProcessRunState};
pub use queue::ReadyQueue;
pub use simulator::{Schedule, Simulator, simulate};
