//! Tick, process identifier, and quantum types.
//!
//! This module defines the scalar vocabulary of the simulator. It provides the following:
//! 1. **Ticks:** The indivisible unit of simulated time, used for arrivals, bursts, and results.
//! 2. **Process Identifiers:** The caller-assigned id carried through to the report.
//! 3. **Quantum:** A validated, strictly positive time-slice length.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::Serialize;

use super::error::SimError;

/// Simulated time, in ticks. Exactly one process (or none) runs per tick.
pub type Ticks = u64;

/// Process identifier as declared in the workload.
pub type Pid = u32;

/// Maximum number of contiguous ticks a process may hold the CPU.
///
/// A quantum is never zero; construction goes through [`Quantum::new`] or
/// [`str::parse`], both of which reject it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    /// Creates a quantum from a raw tick count.
    ///
    /// # Arguments
    ///
    /// * `ticks` - Slice length in ticks.
    ///
    /// # Returns
    ///
    /// The quantum, or [`SimError::InvalidWorkload`] when `ticks` is zero.
    pub fn new(ticks: Ticks) -> Result<Self, SimError> {
        NonZeroU64::new(ticks)
            .map(Self)
            .ok_or_else(|| SimError::InvalidWorkload("quantum length must be positive".into()))
    }

    /// Returns the slice length in ticks.
    #[inline]
    pub const fn ticks(self) -> Ticks {
        self.0.get()
    }
}

impl FromStr for Quantum {
    type Err = SimError;

    /// Parses a quantum from a command-line argument.
    ///
    /// Only ASCII digits are accepted: no sign, whitespace, or separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SimError::Parse("quantum length is empty".into()));
        }
        if let Some(bad) = s.chars().find(|c| !c.is_ascii_digit()) {
            return Err(SimError::Parse(format!(
                "quantum length '{s}' contains non-digit character {bad:?}"
            )));
        }
        let ticks = s
            .bytes()
            .try_fold(0u64, |acc, b| {
                acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
            })
            .ok_or_else(|| SimError::Parse(format!("quantum length '{s}' is out of range")))?;
        Self::new(ticks)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
