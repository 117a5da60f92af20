//! Error definitions for the scheduling simulator.
//!
//! This module defines how every failure in the crate is represented and reported. It provides:
//! 1. **Error Kinds:** One variant per failure class, from bad usage through report output.
//! 2. **Exit Codes:** An errno-style process exit status for each kind.
//! 3. **Result Alias:** A crate-wide `Result` using [`SimError`].
//!
//! None of these errors are recoverable: the caller reports the diagnostic and
//! stops without printing any partial metrics.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, SimError>;

/// Every failure the simulator or its front end can report.
#[derive(Error, Debug)]
pub enum SimError {
    /// The command line did not have the expected shape.
    #[error("usage: {0}")]
    Usage(String),

    /// The workload file could not be opened or read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Numeric input was malformed, truncated, or out of range.
    #[error("parse error: {0}")]
    Parse(String),

    /// Storage for the declared number of processes could not be reserved.
    #[error("cannot allocate storage for {count} processes")]
    Allocation {
        /// Number of processes the workload declared.
        count: u64,
    },

    /// The workload or quantum is well formed but cannot be simulated.
    #[error("invalid workload: {0}")]
    InvalidWorkload(String),

    /// The configuration file is malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The report could not be produced or written.
    #[error("cannot write report: {0}")]
    Output(#[source] io::Error),
}

impl SimError {
    /// Returns the process exit status for this error.
    ///
    /// I/O failures surface the OS error code of the underlying
    /// [`io::Error`]; the other kinds map to fixed errno values.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Parse(_) | Self::InvalidWorkload(_) | Self::Config(_) => {
                libc::EINVAL
            }
            Self::Io { source, .. } | Self::Output(source) => source
                .raw_os_error()
                .filter(|&code| code != 0)
                .unwrap_or(libc::EIO),
            Self::Allocation { .. } => libc::ENOMEM,
        }
    }

    /// Short, stable name of the error kind, used as a structured log field.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::Io { .. } => "io",
            Self::Parse(_) => "parse",
            Self::Allocation { .. } => "allocation",
            Self::InvalidWorkload(_) => "invalid_workload",
            Self::Config(_) => "config",
            Self::Output(_) => "output",
        }
    }
}
