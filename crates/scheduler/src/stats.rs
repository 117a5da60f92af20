//! Schedule statistics aggregation and reporting.
//!
//! This module reduces a finished [`Schedule`] to the metrics the simulator reports. It provides:
//! 1. **Averages:** Waiting, response, and turnaround time across all processes.
//! 2. **Utilisation:** Busy ticks against total simulated ticks.
//! 3. **Reports:** The two-line text summary, a per-process table, and a JSON document.

use std::io::{self, Write};

use serde::Serialize;

use crate::common::error::{Result, SimError};
use crate::common::time::{Quantum, Ticks};
use crate::sim::process::ProcessOutcome;
use crate::sim::simulator::Schedule;

/// Aggregate metrics for one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleStats {
    /// Number of processes simulated.
    pub processes: usize,
    /// Quantum used for the run.
    pub quantum: Quantum,
    /// Ticks simulated, including the final retirement tick.
    pub total_ticks: Ticks,
    /// Ticks in which the CPU was occupied.
    pub busy_ticks: Ticks,
    /// Sum of waiting times.
    pub total_wait: Ticks,
    /// Sum of response times.
    pub total_response: Ticks,
    /// Mean ticks spent ready but not running.
    pub average_wait: f64,
    /// Mean ticks between arrival and first dispatch.
    pub average_response: f64,
    /// Mean ticks between arrival and completion.
    pub average_turnaround: f64,
    /// Fraction of simulated ticks in which the CPU was busy.
    pub utilization: f64,
}

impl ScheduleStats {
    /// Computes the aggregate metrics of a schedule.
    ///
    /// # Returns
    ///
    /// The metrics, or [`SimError::InvalidWorkload`] for an empty schedule,
    /// whose averages are undefined.
    pub fn from_schedule(schedule: &Schedule) -> Result<Self> {
        let outcomes = schedule.outcomes();
        if outcomes.is_empty() {
            return Err(SimError::InvalidWorkload(
                "cannot average over zero processes".into(),
            ));
        }

        let n = outcomes.len() as f64;
        let total_wait: Ticks = outcomes.iter().map(|o| o.wait_time).sum();
        let total_response: Ticks = outcomes.iter().map(|o| o.response_time).sum();
        let total_turnaround: Ticks = outcomes.iter().map(ProcessOutcome::turnaround_time).sum();
        let utilization = if schedule.total_ticks() == 0 {
            0.0
        } else {
            schedule.busy_ticks() as f64 / schedule.total_ticks() as f64
        };

        Ok(Self {
            processes: outcomes.len(),
            quantum: schedule.quantum(),
            total_ticks: schedule.total_ticks(),
            busy_ticks: schedule.busy_ticks(),
            total_wait,
            total_response,
            average_wait: total_wait as f64 / n,
            average_response: total_response as f64 / n,
            average_turnaround: total_turnaround as f64 / n,
            utilization,
        })
    }

    /// Writes the two summary lines.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination writer.
    /// * `precision` - Decimal places for the averages.
    pub fn write_summary<W: Write>(&self, out: &mut W, precision: usize) -> io::Result<()> {
        out.write_all(self.summary(precision).as_bytes())
    }

    /// Returns the two summary lines as a string.
    ///
    /// Averages are rounded to `precision` places, with exact ties going to
    /// the even digit.
    pub fn summary(&self, precision: usize) -> String {
        format!(
            "Average waiting time: {:.precision$}\nAverage response time: {:.precision$}\n",
            self.average_wait, self.average_response
        )
    }
}

/// Writes one line per process, in declaration order.
pub fn write_process_table<W: Write>(out: &mut W, schedule: &Schedule) -> io::Result<()> {
    for o in schedule.outcomes() {
        writeln!(
            out,
            "process {}: arrival {} burst {} response {} wait {} end {}",
            o.pid, o.arrival_time, o.burst_time, o.response_time, o.wait_time, o.end_time
        )?;
    }
    Ok(())
}

/// JSON document combining aggregate metrics and per-process outcomes.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Aggregate metrics.
    pub stats: &'a ScheduleStats,
    /// Per-process outcomes, in declaration order.
    pub processes: &'a [ProcessOutcome],
}

impl<'a> Report<'a> {
    /// Bundles the metrics and outcomes of a run.
    pub fn new(stats: &'a ScheduleStats, schedule: &'a Schedule) -> Self {
        Self {
            stats,
            processes: schedule.outcomes(),
        }
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Output(e.into()))
    }
}
