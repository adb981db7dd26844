//! Crate error type
//!
//! Error codes:
//! - DTAUS_CORRUPTED (FATAL severity)
//! - DTAUS_UNRECOGNIZED_FORMAT (FATAL severity)
//! - DTAUS_VALIDATION_FAILED (ERROR severity)
//! - DTAUS_INDEX_OUT_OF_BOUNDS (ERROR severity)
//! - DTAUS_ILLEGAL_ARGUMENT (ERROR severity)
//! - DTAUS_CODEC_FAILED (ERROR severity)
//! - DTAUS_CANCELLED (ERROR severity)
//! - DTAUS_IO_FAILED (FATAL severity)

use std::io;

use thiserror::Error;

use crate::codec::CodecError;
use crate::diagnostics::{Message, MessageKind};
use crate::observability::Severity;
use crate::validation::ValidationErrors;

/// Result type for DTAUS operations
pub type DtausResult<T> = Result<T, DtausError>;

#[derive(Debug, Error)]
pub enum DtausError {
    /// Malformed data at an absolute container position
    #[error("corrupted data at position {position}: {kind}: {detail}")]
    Corrupted {
        position: u64,
        /// Logical file that detected the problem
        file: Option<usize>,
        kind: MessageKind,
        detail: String,
    },

    /// Neither the disk nor the tape magic number
    #[error("unrecognized format")]
    UnrecognizedFormat,

    /// A header or transaction was rejected by the validators
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// A value that cannot be encoded into its field
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The task monitor asked to stop
    #[error("operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DtausError {
    pub(crate) fn corrupted(file: Option<usize>, message: &Message) -> Self {
        DtausError::Corrupted {
            position: message.position,
            file,
            kind: message.kind,
            detail: message.detail.clone(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DtausError::Corrupted { .. } => "DTAUS_CORRUPTED",
            DtausError::UnrecognizedFormat => "DTAUS_UNRECOGNIZED_FORMAT",
            DtausError::Validation(_) => "DTAUS_VALIDATION_FAILED",
            DtausError::IndexOutOfBounds { .. } => "DTAUS_INDEX_OUT_OF_BOUNDS",
            DtausError::IllegalArgument(_) => "DTAUS_ILLEGAL_ARGUMENT",
            DtausError::Codec(_) => "DTAUS_CODEC_FAILED",
            DtausError::Cancelled => "DTAUS_CANCELLED",
            DtausError::Io(_) => "DTAUS_IO_FAILED",
        }
    }

    /// Corrupt or unreadable containers are fatal for the container; the
    /// rest only fail the operation.
    pub fn severity(&self) -> Severity {
        match self {
            DtausError::Corrupted { .. } | DtausError::UnrecognizedFormat | DtausError::Io(_) => {
                Severity::Fatal
            }
            _ => Severity::Error,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
