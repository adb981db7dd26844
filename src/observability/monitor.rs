//! Progress and cancellation hook for long-running operations

use std::fmt;

/// Long-running work the engine reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Walking the transactions of a logical file
    Scan,
    /// Moving the container tail to open a gap
    InsertBytes,
    /// Moving the container tail to close a gap
    RemoveBytes,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Scan => "SCAN",
            Task::InsertBytes => "INSERT_BYTES",
            Task::RemoveBytes => "REMOVE_BYTES",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives progress and may ask the engine to stop.
///
/// Cancellation is polled after each transaction during a scan. Byte
/// shifts report progress per chunk but always run to completion.
pub trait TaskMonitor {
    /// `done` out of `total` bytes processed
    fn progress(&self, _task: Task, _done: u64, _total: u64) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Monitor that ignores progress and never cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl TaskMonitor for NoopMonitor {}
