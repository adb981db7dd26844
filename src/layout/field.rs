//! Field identifiers and field locations

use serde::{Deserialize, Serialize};

/// Identifier of a record field, named after the DTAUS field numbers.
///
/// `C19` and `C20` stand for the type tag and the value of any extension
/// part; they only appear in diagnostics.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A9,
    A10,
    A11b,
    A12,
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7a,
    C7b,
    C9,
    C10,
    C11,
    C12,
    C14a,
    C15,
    C16,
    C17a,
    C18,
    C19,
    C20,
    E1,
    E2,
    E4,
    E5,
    E6,
    E7,
    E8,
}

/// How the bytes of a field encode its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// One character per decimal digit
    Digits,
    /// Packed BCD, optionally with a trailing sign nibble
    Packed { signed: bool },
    /// Unsigned big-endian integer
    Binary,
    /// Space-padded alphanumeric text
    Text,
    /// `DDMMYY`
    ShortDate,
    /// `DDMMYYYY`
    LongDate,
}

/// Location of a field relative to the start of its record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub offset: usize,
    pub length: usize,
    pub encoding: Encoding,
}

impl FieldSpec {
    pub const fn new(field: Field, offset: usize, length: usize, encoding: Encoding) -> Self {
        Self {
            field,
            offset,
            length,
            encoding,
        }
    }

    /// Byte range of the field within its record
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.length
    }

    /// Whether the field holds a number
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.encoding,
            Encoding::Digits | Encoding::Packed { .. } | Encoding::Binary
        )
    }
}
