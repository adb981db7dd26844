//! Observable events
//!
//! Events are explicit and typed; each carries its own severity.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Container lifecycle
    /// Format detection succeeded
    FormatDetected,
    /// Sequential scan of a container begins
    ScanBegin,
    /// Sequential scan of a container complete
    ScanComplete,
    /// Container flushed
    Commit,

    // Logical files
    LogicalFileAdded,
    LogicalFileRemoved,
    HeaderUpdated,

    // Transactions
    TransactionAdded,
    TransactionUpdated,
    TransactionRemoved,

    // Data problems
    /// Stored checksum differs from the recomputed one
    ChecksumMismatch,
    /// A space-padded numeric field was read as zeros
    ValueCorrected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::FormatDetected => "FORMAT_DETECTED",
            Event::ScanBegin => "SCAN_BEGIN",
            Event::ScanComplete => "SCAN_COMPLETE",
            Event::Commit => "COMMIT",
            Event::LogicalFileAdded => "LOGICAL_FILE_ADDED",
            Event::LogicalFileRemoved => "LOGICAL_FILE_REMOVED",
            Event::HeaderUpdated => "HEADER_UPDATED",
            Event::TransactionAdded => "TRANSACTION_ADDED",
            Event::TransactionUpdated => "TRANSACTION_UPDATED",
            Event::TransactionRemoved => "TRANSACTION_REMOVED",
            Event::ChecksumMismatch => "CHECKSUM_MISMATCH",
            Event::ValueCorrected => "VALUE_CORRECTED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::ChecksumMismatch | Event::ValueCorrected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::FormatDetected,
            Event::ScanBegin,
            Event::ScanComplete,
            Event::Commit,
            Event::LogicalFileAdded,
            Event::LogicalFileRemoved,
            Event::HeaderUpdated,
            Event::TransactionAdded,
            Event::TransactionUpdated,
            Event::TransactionRemoved,
            Event::ChecksumMismatch,
            Event::ValueCorrected,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_data_problems_warn() {
        assert_eq!(Event::ChecksumMismatch.severity(), Severity::Warn);
        assert_eq!(Event::ValueCorrected.severity(), Severity::Warn);
        assert_eq!(Event::ScanBegin.severity(), Severity::Info);
    }
}
