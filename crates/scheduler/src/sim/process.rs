//! Process descriptors, run-state, and final outcomes.
//!
//! A process moves through three representations over a run:
//! 1. **Descriptor:** The immutable `(pid, arrival, burst)` triple produced by the loader.
//! 2. **Run-State:** Mutable bookkeeping owned by the simulator while the process is live.
//! 3. **Outcome:** The immutable response/wait/end record handed to the aggregator.

use serde::Serialize;

use crate::common::time::{Pid, Ticks};

/// A process as declared in the workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ProcessDescriptor {
    /// Caller-assigned identifier.
    pub pid: Pid,
    /// Tick at which the process joins the ready queue.
    pub arrival_time: Ticks,
    /// Total CPU ticks the process needs.
    pub burst_time: Ticks,
}

impl ProcessDescriptor {
    /// Creates a descriptor.
    #[inline]
    pub const fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
        }
    }
}

/// Completion bookkeeping, recorded exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Completion {
    end_time: Ticks,
    wait_time: Ticks,
}

/// What happened when a process occupied the CPU for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Execution {
    /// Response time, present only on the process's first tick on the CPU.
    pub first_response: Option<Ticks>,
    /// Ticks of work left after this one.
    pub remaining: Ticks,
    /// End and wait time, present only on the tick that finished the process.
    pub completed: Option<(Ticks, Ticks)>,
}

/// Mutable per-process state owned by the simulator.
///
/// `remaining_time` only ever decreases, by one per executed tick, and never
/// below zero. Response and completion data are explicit `Option`s rather than
/// sentinel tick values.
#[derive(Clone, Debug)]
pub struct ProcessRunState {
    descriptor: ProcessDescriptor,
    remaining_time: Ticks,
    response_time: Option<Ticks>,
    completion: Option<Completion>,
    retired: bool,
}

impl ProcessRunState {
    /// Creates the run-state for a freshly loaded process.
    pub const fn new(descriptor: ProcessDescriptor) -> Self {
        Self {
            descriptor,
            remaining_time: descriptor.burst_time,
            response_time: None,
            completion: None,
            retired: false,
        }
    }

    /// Returns the descriptor this state was built from.
    #[inline]
    pub const fn descriptor(&self) -> &ProcessDescriptor {
        &self.descriptor
    }

    /// Returns the process identifier.
    #[inline]
    pub const fn pid(&self) -> Pid {
        self.descriptor.pid
    }

    /// Returns the CPU ticks still required.
    #[inline]
    pub const fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    /// Returns true once the process has been dispatched at least once.
    #[inline]
    pub const fn has_started(&self) -> bool {
        self.response_time.is_some()
    }

    /// Returns true once all of the process's work has executed.
    #[inline]
    pub const fn has_completed(&self) -> bool {
        self.completion.is_some()
    }

    /// Returns true once the process has left the ready queue for good.
    #[inline]
    pub const fn is_retired(&self) -> bool {
        self.retired
    }

    /// Runs the process for the tick starting at `now`.
    ///
    /// Records the response time on the first call and the end and wait
    /// times on the call that exhausts the burst.
    pub(crate) fn execute(&mut self, now: Ticks) -> Execution {
        debug_assert!(self.remaining_time > 0, "executing a finished process");
        debug_assert!(now >= self.descriptor.arrival_time, "executing before arrival");

        let first_response = if self.response_time.is_none() {
            let response = now - self.descriptor.arrival_time;
            self.response_time = Some(response);
            Some(response)
        } else {
            None
        };

        self.remaining_time -= 1;

        let mut completed = None;
        if self.remaining_time == 0 && self.completion.is_none() {
            let end_time = now + 1;
            let wait_time = end_time - self.descriptor.arrival_time - self.descriptor.burst_time;
            self.completion = Some(Completion {
                end_time,
                wait_time,
            });
            completed = Some((end_time, wait_time));
        }

        Execution {
            first_response,
            remaining: self.remaining_time,
            completed,
        }
    }

    /// Marks the process as permanently removed from scheduling.
    pub(crate) fn retire(&mut self) {
        debug_assert!(self.has_completed(), "retiring an unfinished process");
        self.retired = true;
    }

    /// Returns the final outcome, or `None` while the process is unfinished.
    pub fn outcome(&self) -> Option<ProcessOutcome> {
        let completion = self.completion?;
        let response_time = self.response_time?;
        Some(ProcessOutcome {
            pid: self.descriptor.pid,
            arrival_time: self.descriptor.arrival_time,
            burst_time: self.descriptor.burst_time,
            response_time,
            wait_time: completion.wait_time,
            end_time: completion.end_time,
        })
    }
}

/// Final, immutable result for one process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    /// Process identifier.
    pub pid: Pid,
    /// Tick the process arrived.
    pub arrival_time: Ticks,
    /// CPU ticks the process needed.
    pub burst_time: Ticks,
    /// Ticks between arrival and first dispatch.
    pub response_time: Ticks,
    /// Ticks spent ready but not running.
    pub wait_time: Ticks,
    /// Tick just after the last unit of work.
    pub end_time: Ticks,
}

impl ProcessOutcome {
    /// Ticks between arrival and completion.
    #[inline]
    pub const fn turnaround_time(&self) -> Ticks {
        self.end_time - self.arrival_time
    }
}
