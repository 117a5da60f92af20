//! Round-robin simulator: owns the run-state arena, the ready queue, and the clock.
//!
//! Each call to [`Simulator::step`] advances one tick through four phases:
//! 1. **Admission:** Processes arriving at this tick join the queue tail in declaration order.
//! 2. **Expiry:** If the running slice is exhausted, the head is rotated to the tail or retired.
//! 3. **Execution:** The head runs one tick; the first run records its response time.
//! 4. **Termination:** The run ends once every process has been retired.
//!
//! A tick with an empty ready queue skips ahead to the next arrival.
//!
//! The simulator is a pure function of its validated input: no global state,
//! no randomness, no iteration over unordered collections.

use std::collections::HashSet;

use serde::Serialize;

use crate::common::error::{Result, SimError};
use crate::common::time::{Quantum, Ticks};
use crate::sim::events::SchedEvent;
use crate::sim::process::{ProcessDescriptor, ProcessOutcome, ProcessRunState};
use crate::sim::queue::ReadyQueue;

/// Single-CPU round-robin simulator.
#[derive(Debug)]
pub struct Simulator {
    /// Run-state arena, in declaration order.
    processes: Vec<ProcessRunState>,
    /// Arena indices stably sorted by arrival time.
    arrivals: Vec<usize>,
    /// Next entry of `arrivals` not yet admitted.
    arrival_cursor: usize,
    queue: ReadyQueue,
    quantum: Quantum,
    /// Ticks left in the current head's slice; zero forces a rotation.
    quantum_remaining: Ticks,
    now: Ticks,
    retired: usize,
    busy_ticks: Ticks,
    finished: bool,
}

impl Simulator {
    /// Creates a simulator for `workload` with slices of `quantum` ticks.
    ///
    /// # Arguments
    ///
    /// * `workload` - Process descriptors in declaration order.
    /// * `quantum` - Time-slice length.
    ///
    /// # Returns
    ///
    /// The simulator positioned at tick 0, or [`SimError::InvalidWorkload`] if
    /// the workload is empty, a burst time is zero, or the schedule horizon
    /// does not fit in a tick counter.
    pub fn new(workload: &[ProcessDescriptor], quantum: Quantum) -> Result<Self> {
        if workload.is_empty() {
            return Err(SimError::InvalidWorkload(
                "workload contains no processes".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(workload.len());
        let mut horizon: Ticks = 0;
        for process in workload {
            if process.burst_time == 0 {
                return Err(SimError::InvalidWorkload(format!(
                    "process {} has a zero burst time",
                    process.pid
                )));
            }
            if !seen.insert(process.pid) {
                tracing::warn!(pid = process.pid, "duplicate process id in workload");
            }
            horizon = horizon
                .checked_add(process.burst_time)
                .and_then(|h| h.checked_add(1))
                .ok_or_else(|| {
                    SimError::InvalidWorkload("total burst time overflows the tick counter".into())
                })?;
        }
        let latest_arrival = workload.iter().map(|p| p.arrival_time).max().unwrap_or(0);
        if latest_arrival.checked_add(horizon).is_none() {
            return Err(SimError::InvalidWorkload(
                "schedule horizon overflows the tick counter".into(),
            ));
        }

        let mut arrivals: Vec<usize> = (0..workload.len()).collect();
        arrivals.sort_by_key(|&i| workload[i].arrival_time);

        tracing::debug!(
            processes = workload.len(),
            quantum = quantum.ticks(),
            "simulator initialised"
        );

        Ok(Self {
            processes: workload.iter().copied().map(ProcessRunState::new).collect(),
            arrivals,
            arrival_cursor: 0,
            queue: ReadyQueue::with_capacity(workload.len()),
            quantum,
            quantum_remaining: quantum.ticks(),
            now: 0,
            retired: 0,
            busy_ticks: 0,
            finished: false,
        })
    }

    /// Returns the tick the next call to [`step`](Self::step) will simulate.
    #[inline]
    pub const fn now(&self) -> Ticks {
        self.now
    }

    /// Returns the configured quantum.
    #[inline]
    pub const fn quantum(&self) -> Quantum {
        self.quantum
    }

    /// Returns the number of processes in the ready queue.
    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Returns the run-state arena, in declaration order.
    pub fn processes(&self) -> &[ProcessRunState] {
        &self.processes
    }

    /// Returns true once every process has been retired.
    #[inline]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the simulation by one tick, or across one idle span.
    ///
    /// When no process is ready, the clock jumps straight to the next arrival
    /// and the skipped ticks are reported as a single [`SchedEvent::Idle`].
    ///
    /// # Returns
    ///
    /// The events of this step in the order they happened. Once the simulation
    /// has finished, the clock no longer moves and the result is empty.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        let mut events = Vec::new();
        self.step_into(&mut events);
        events
    }

    /// Like [`step`](Self::step), appending the events to `events`.
    pub fn step_into(&mut self, events: &mut Vec<SchedEvent>) {
        if self.finished {
            return;
        }

        self.admit_arrivals(events);
        self.expire_quantum(events);

        if self.retired == self.processes.len() {
            self.finished = true;
            tracing::debug!(tick = self.now, "all processes retired");
            self.now += 1;
            return;
        }

        if self.queue.is_empty() {
            let until = self.next_arrival().unwrap_or(self.now + 1);
            tracing::debug!(tick = self.now, until, "cpu idle");
            events.push(SchedEvent::Idle { until });
            self.now = until;
            return;
        }

        self.execute_head(events);
        self.now += 1;
    }

    /// Runs to completion and returns the final schedule.
    pub fn run(self) -> Schedule {
        self.run_with(|_, _| {})
    }

    /// Runs to completion, handing each step's events to `observer`.
    ///
    /// # Arguments
    ///
    /// * `observer` - Called once per step with its starting tick and its events.
    pub fn run_with<F>(mut self, mut observer: F) -> Schedule
    where
        F: FnMut(Ticks, &[SchedEvent]),
    {
        let mut events = Vec::new();
        while !self.finished {
            let tick = self.now;
            events.clear();
            self.step_into(&mut events);
            observer(tick, &events);
        }
        self.into_schedule()
    }

    /// Arrival tick of the next process not yet admitted.
    fn next_arrival(&self) -> Option<Ticks> {
        self.arrivals
            .get(self.arrival_cursor)
            .map(|&index| self.processes[index].descriptor().arrival_time)
    }

    /// Appends every process arriving at the current tick to the queue tail.
    fn admit_arrivals(&mut self, events: &mut Vec<SchedEvent>) {
        while let Some(&index) = self.arrivals.get(self.arrival_cursor) {
            if self.processes[index].descriptor().arrival_time != self.now {
                break;
            }
            self.arrival_cursor += 1;
            if self.queue.push_back(index) {
                events.push(SchedEvent::Arrived {
                    pid: self.processes[index].pid(),
                });
            }
        }
    }

    /// Rotates or retires the head once its slice is used up.
    fn expire_quantum(&mut self, events: &mut Vec<SchedEvent>) {
        if self.quantum_remaining != 0 {
            return;
        }
        let Some(index) = self.queue.pop_front() else {
            return;
        };
        self.quantum_remaining = self.quantum.ticks();

        let process = &mut self.processes[index];
        let pid = process.pid();
        if process.remaining_time() > 0 {
            let remaining = process.remaining_time();
            let _requeued = self.queue.push_back(index);
            tracing::debug!(tick = self.now, pid, remaining, "quantum expired");
            events.push(SchedEvent::Preempted { pid, remaining });
        } else {
            process.retire();
            self.retired += 1;
            tracing::debug!(tick = self.now, pid, "process retired");
            events.push(SchedEvent::Retired { pid });
        }
    }

    /// Runs the queue head for the current tick.
    fn execute_head(&mut self, events: &mut Vec<SchedEvent>) {
        let Some(index) = self.queue.front() else {
            return;
        };

        let process = &mut self.processes[index];
        let pid = process.pid();
        let execution = process.execute(self.now);
        self.busy_ticks += 1;
        self.quantum_remaining = self.quantum_remaining.saturating_sub(1);

        if let Some(response_time) = execution.first_response {
            events.push(SchedEvent::Started { pid, response_time });
        }
        events.push(SchedEvent::Ran {
            pid,
            remaining: execution.remaining,
        });
        if let Some((end_time, wait_time)) = execution.completed {
            tracing::debug!(tick = self.now, pid, end_time, wait_time, "process completed");
            events.push(SchedEvent::Completed {
                pid,
                end_time,
                wait_time,
            });
            // The finished head is dropped by the next tick's expiry check,
            // and its successor starts with a full slice.
            self.quantum_remaining = 0;
        }
    }

    /// Collects the per-process outcomes of a finished run.
    fn into_schedule(self) -> Schedule {
        let outcomes: Vec<ProcessOutcome> = self
            .processes
            .iter()
            .filter_map(ProcessRunState::outcome)
            .collect();
        debug_assert_eq!(outcomes.len(), self.processes.len());

        tracing::info!(
            processes = outcomes.len(),
            total_ticks = self.now,
            busy_ticks = self.busy_ticks,
            "simulation finished"
        );

        Schedule {
            quantum: self.quantum,
            total_ticks: self.now,
            busy_ticks: self.busy_ticks,
            outcomes,
        }
    }
}

/// Immutable result of a finished simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schedule {
    quantum: Quantum,
    total_ticks: Ticks,
    busy_ticks: Ticks,
    outcomes: Vec<ProcessOutcome>,
}

impl Schedule {
    /// Returns the quantum the schedule was produced with.
    #[inline]
    pub const fn quantum(&self) -> Quantum {
        self.quantum
    }

    /// Ticks simulated, including the final retirement tick.
    #[inline]
    pub const fn total_ticks(&self) -> Ticks {
        self.total_ticks
    }

    /// Ticks in which some process occupied the CPU.
    #[inline]
    pub const fn busy_ticks(&self) -> Ticks {
        self.busy_ticks
    }

    /// Per-process outcomes, in declaration order.
    pub fn outcomes(&self) -> &[ProcessOutcome] {
        &self.outcomes
    }

    /// Number of simulated processes.
    #[inline]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if the schedule holds no processes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Simulates `workload` under round-robin with the given quantum.
///
/// # Example
///
/// ```
/// use rrsim_core::common::Quantum;
/// use rrsim_core::sim::{ProcessDescriptor, simulate};
///
/// let workload = [ProcessDescriptor::new(1, 0, 5), ProcessDescriptor::new(2, 2, 3)];
/// let schedule = simulate(&workload, Quantum::new(2).unwrap()).unwrap();
/// let waits: Vec<u64> = schedule.outcomes().iter().map(|o| o.wait_time).collect();
/// assert_eq!(waits, vec![3, 2]);
/// ```
pub fn simulate(workload: &[ProcessDescriptor], quantum: Quantum) -> Result<Schedule> {
    Ok(Simulator::new(workload, quantum)?.run())
}
