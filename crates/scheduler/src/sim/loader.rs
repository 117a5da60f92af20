//! Workload loader.
//!
//! This module turns a workload file into process descriptors. It performs:
//! 1. **File reading:** Reads the whole input into memory.
//! 2. **Integer scanning:** Extracts ASCII-decimal integers separated by any non-digit bytes.
//! 3. **Record assembly:** Reads the process count, then one `pid arrival burst` triple per process.
//!
//! Running out of input before the declared number of integers is a parse error.
//! Bytes after the last expected integer are ignored.

use std::fs;
use std::path::Path;

use crate::common::error::{Result, SimError};
use crate::common::time::Pid;
use crate::sim::process::ProcessDescriptor;

/// Reads and parses a workload file.
///
/// # Arguments
///
/// * `path` - Path to the workload file.
///
/// # Returns
///
/// The process descriptors in declaration order.
pub fn load_workload(path: &Path) -> Result<Vec<ProcessDescriptor>> {
    let data = fs::read(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let workload = parse_workload(&data)?;
    tracing::info!(
        path = %path.display(),
        bytes = data.len(),
        processes = workload.len(),
        "workload loaded"
    );
    Ok(workload)
}

/// Parses a workload from raw bytes.
///
/// # Example
///
/// ```
/// use rrsim_core::sim::loader::parse_workload;
///
/// let workload = parse_workload(b"2\n1 0 5\n2 2 3\n").unwrap();
/// assert_eq!(workload.len(), 2);
/// assert_eq!(workload[1].arrival_time, 2);
/// ```
pub fn parse_workload(data: &[u8]) -> Result<Vec<ProcessDescriptor>> {
    let mut scanner = IntScanner::new(data);

    let count = scanner.next_int("the process count")?;
    if count == 0 {
        return Err(SimError::InvalidWorkload(
            "workload declares zero processes".into(),
        ));
    }
    let capacity = usize::try_from(count).map_err(|_| SimError::Allocation { count })?;
    let mut workload = Vec::new();
    workload
        .try_reserve_exact(capacity)
        .map_err(|_| SimError::Allocation { count })?;

    for record in 1..=count {
        let pid = scanner.next_int_at("pid", record)?;
        let pid = Pid::try_from(pid).map_err(|_| {
            SimError::Parse(format!("pid {pid} of process record {record} is out of range"))
        })?;
        let arrival_time = scanner.next_int_at("arrival time", record)?;
        let burst_time = scanner.next_int_at("burst time", record)?;
        workload.push(ProcessDescriptor::new(pid, arrival_time, burst_time));
    }

    if scanner.has_remaining_digits() {
        tracing::debug!(
            offset = scanner.offset(),
            "ignoring trailing data after the last process record"
        );
    }
    Ok(workload)
}

/// Cursor over a byte buffer yielding unsigned decimal integers.
struct IntScanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> IntScanner<'a> {
    const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    const fn offset(&self) -> usize {
        self.pos
    }

    /// Returns true if any digit remains after the cursor.
    fn has_remaining_digits(&self) -> bool {
        self.data[self.pos..].iter().any(u8::is_ascii_digit)
    }

    /// Reads the next integer of field `field` in process record `record`.
    fn next_int_at(&mut self, field: &str, record: u64) -> Result<u64> {
        self.next_int(&format!("the {field} of process record {record}"))
    }

    /// Skips non-digit bytes and reads the following run of digits.
    ///
    /// `what` names the expected value in error messages.
    fn next_int(&mut self, what: &str) -> Result<u64> {
        while self.pos < self.data.len() && !self.data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == self.data.len() {
            return Err(SimError::Parse(format!(
                "reached end of input while looking for {what}"
            )));
        }

        let start = self.pos;
        let mut value: u64 = 0;
        while let Some(&byte) = self.data.get(self.pos).filter(|b| b.is_ascii_digit()) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(byte - b'0')))
                .ok_or_else(|| {
                    SimError::Parse(format!("{what} at byte {start} does not fit in 64 bits"))
                })?;
            self.pos += 1;
        }
        Ok(value)
    }
}
