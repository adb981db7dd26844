//! Observability
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed events
//! - Progress and cancellation hook for long-running operations
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use dtaus::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! log_event_with_fields(Event::ScanComplete, &[("logical_files", "2")]);
//! ```

mod events;
mod logger;
mod monitor;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use monitor::{NoopMonitor, Task, TaskMonitor};

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::ScanBegin);
        log_event(Event::Commit);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::TransactionAdded, &[("index", "0")]);
    }

    #[test]
    fn test_noop_monitor_never_cancels() {
        let monitor = NoopMonitor;
        monitor.progress(Task::Scan, 1, 2);
        assert!(!monitor.is_cancelled());
    }
}
