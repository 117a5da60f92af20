//! Scheduling events emitted by each simulator tick.

use std::fmt;

use serde::Serialize;

use crate::common::time::{Pid, Ticks};

/// One observable state transition within a tick.
///
/// Events of a tick are produced in the order the tick performs them:
/// admissions, then the quantum-expiry rotation, then execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedEvent {
    /// The process reached its arrival tick and joined the ready queue tail.
    Arrived {
        /// Process identifier.
        pid: Pid,
    },
    /// The head's quantum expired and it was moved to the tail.
    Preempted {
        /// Process identifier.
        pid: Pid,
        /// Ticks of work still outstanding.
        remaining: Ticks,
    },
    /// A finished process was removed from the head of the queue.
    Retired {
        /// Process identifier.
        pid: Pid,
    },
    /// The process ran for the first time.
    Started {
        /// Process identifier.
        pid: Pid,
        /// Ticks between arrival and this first dispatch.
        response_time: Ticks,
    },
    /// The process occupied the CPU for this tick.
    Ran {
        /// Process identifier.
        pid: Pid,
        /// Ticks of work still outstanding after this tick.
        remaining: Ticks,
    },
    /// The process executed its last unit of work.
    Completed {
        /// Process identifier.
        pid: Pid,
        /// Tick just after the final unit of work.
        end_time: Ticks,
        /// Ticks spent ready but not running.
        wait_time: Ticks,
    },
    /// No process was ready; the CPU stays idle up to the next arrival.
    Idle {
        /// Tick at which the next process arrives.
        until: Ticks,
    },
}

impl fmt::Display for SchedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrived { pid } => write!(f, "P{pid} arrived"),
            Self::Preempted { pid, remaining } => {
                write!(f, "P{pid} preempted ({remaining} left)")
            }
            Self::Retired { pid } => write!(f, "P{pid} retired"),
            Self::Started { pid, response_time } => {
                write!(f, "P{pid} started (response {response_time})")
            }
            Self::Ran { pid, remaining } => write!(f, "P{pid} ran ({remaining} left)"),
            Self::Completed {
                pid,
                end_time,
                wait_time,
            } => write!(f, "P{pid} completed at {end_time} (wait {wait_time})"),
            Self::Idle { until } => write!(f, "idle until {until}"),
        }
    }
}
