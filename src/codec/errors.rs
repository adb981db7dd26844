//! Codec error types
//!
//! Codec failures carry no position information: the codec only ever sees
//! a byte window. The engine attaches the absolute position and the field
//! identifier before the failure is reported as a diagnostic or as a
//! corruption error.

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Conversion failure between a byte window and a domain value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A byte that is not a digit in the selected encoding
    #[error("not a number: byte 0x{byte:02X} at offset {offset}")]
    NotANumber { offset: usize, byte: u8 },

    /// A packed-decimal nibble outside 0..=9 or an invalid sign nibble
    #[error("invalid packed decimal nibble 0x{nibble:X} at offset {offset}")]
    InvalidNibble { offset: usize, nibble: u8 },

    /// A byte that decodes to a character outside the DTAUS alphabet
    #[error("illegal character 0x{byte:02X} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    /// A value that cannot be represented in the requested width
    #[error("value {value} does not fit into {width} {unit}")]
    ValueOutOfRange {
        value: i128,
        width: usize,
        unit: &'static str,
    },

    /// A text that is longer than its field
    #[error("text of {length} characters does not fit into {width} bytes")]
    TextTooLong { length: usize, width: usize },

    /// A date that is malformed, partially blank or outside 1980-2079
    #[error("illegal date: {0}")]
    InvalidDate(String),

    /// A byte window of an unsupported size
    #[error("unsupported field width {0}")]
    UnsupportedWidth(usize),
}
