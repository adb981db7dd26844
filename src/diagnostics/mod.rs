//! Diagnostics channel
//!
//! Every read that can hit malformed data takes a `&mut Diagnostics`. The
//! context decides what a problem turns into:
//!
//! - `ErrorPolicy::Strict` (default): the first problem aborts the read with
//!   `DtausError::Corrupted`.
//! - `ErrorPolicy::Lenient`: the problem is recorded as a `Message` and the
//!   read continues with a sentinel value.
//!
//! Structural breaks (a wrong record marker, an unreadable extension count)
//! leave nothing to continue with; they abort in both policies, after being
//! recorded in lenient mode.
//!
//! At most `MAX_MESSAGES` messages are kept; later ones are dropped.

mod message;

pub use message::{Message, MessageKind};

use crate::errors::{DtausError, DtausResult};

/// Messages kept per context
pub const MAX_MESSAGES: usize = 100;

/// How problems in the data are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    #[default]
    Strict,
    Lenient,
}

/// Error policy plus the messages collected under it.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    policy: ErrorPolicy,
    messages: Vec<Message>,
    dropped: usize,
}

impl Diagnostics {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            messages: Vec::new(),
            dropped: 0,
        }
    }

    pub fn strict() -> Self {
        Self::new(ErrorPolicy::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(ErrorPolicy::Lenient)
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ErrorPolicy) {
        self.policy = policy;
    }

    pub fn is_strict(&self) -> bool {
        self.policy == ErrorPolicy::Strict
    }

    /// Records a message, unless the cap is reached.
    pub fn record(&mut self, message: Message) {
        if self.messages.len() < MAX_MESSAGES {
            self.messages.push(message);
        } else {
            self.dropped += 1;
        }
    }

    /// Reports a recoverable problem.
    ///
    /// Strict: returns `Corrupted`. Lenient: records the message and
    /// returns `Ok(())`; the caller continues with a sentinel.
    pub fn raise(&mut self, file: Option<usize>, message: Message) -> DtausResult<()> {
        match self.policy {
            ErrorPolicy::Strict => Err(DtausError::corrupted(file, &message)),
            ErrorPolicy::Lenient => {
                self.record(message);
                Ok(())
            }
        }
    }

    /// Reports a problem that ends the current read in both policies.
    pub fn fatal(&mut self, file: Option<usize>, message: Message) -> DtausError {
        let error = DtausError::corrupted(file, &message);
        if self.policy == ErrorPolicy::Lenient {
            self.record(message);
        }
        error
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages of one kind
    pub fn count(&self, kind: MessageKind) -> usize {
        self.messages.iter().filter(|m| m.kind == kind).count()
    }

    /// Messages dropped after the cap was reached
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Removes and returns all messages.
    pub fn take(&mut self) -> Vec<Message> {
        self.dropped = 0;
        std::mem::take(&mut self.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(position: u64) -> Message {
        Message::new(MessageKind::IllegalData, position, "bad")
    }

    #[test]
    fn test_strict_raise_fails() {
        let mut diagnostics = Diagnostics::strict();
        let err = diagnostics.raise(Some(0), message(7)).unwrap_err();
        match err {
            DtausError::Corrupted { position, file, kind, .. } => {
                assert_eq!(position, 7);
                assert_eq!(file, Some(0));
                assert_eq!(kind, MessageKind::IllegalData);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lenient_raise_records() {
        let mut diagnostics = Diagnostics::lenient();
        diagnostics.raise(None, message(1)).unwrap();
        diagnostics.raise(None, message(2)).unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.count(MessageKind::IllegalData), 2);
        assert_eq!(diagnostics.count(MessageKind::ChecksumMismatch), 0);
    }

    #[test]
    fn test_fatal_records_in_lenient_mode() {
        let mut diagnostics = Diagnostics::lenient();
        let err = diagnostics.fatal(Some(1), message(3));
        assert!(matches!(err, DtausError::Corrupted { position: 3, .. }));
        assert_eq!(diagnostics.len(), 1);

        let mut strict = Diagnostics::strict();
        let _ = strict.fatal(Some(1), message(3));
        assert!(strict.is_empty());
    }

    #[test]
    fn test_cap() {
        let mut diagnostics = Diagnostics::lenient();
        for i in 0..150 {
            diagnostics.raise(None, message(i)).unwrap();
        }
        assert_eq!(diagnostics.len(), MAX_MESSAGES);
        assert_eq!(diagnostics.dropped(), 50);
        assert_eq!(diagnostics.messages()[99].position, 99);

        let taken = diagnostics.take();
        assert_eq!(taken.len(), MAX_MESSAGES);
        assert!(diagnostics.is_empty());
    }
}
