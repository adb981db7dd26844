//! Domain value errors
//!
//! Raised when a value cannot be constructed because it violates the
//! format's own rules (width, clearing area, alphabet).

use thiserror::Error;

/// Result type for domain value construction
pub type TypeResult<T> = Result<T, TypeError>;

/// Invalid domain value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("invalid bank code {0}: must have 8 digits with clearing area 1-8")]
    InvalidBankCode(u64),

    #[error("invalid account number {0}: must be 1..=9999999999")]
    InvalidAccountNumber(u64),

    #[error("invalid reference number {value}: must have at most {digits} digits")]
    InvalidReferenceNumber { value: u64, digits: usize },

    #[error("invalid text '{text}': {reason}")]
    InvalidText { text: String, reason: String },

    #[error("invalid transaction type {key:02}{extension:03}")]
    InvalidTextschluessel { key: u32, extension: u32 },

    #[error("invalid currency code '{0}'")]
    InvalidCurrency(String),

    #[error("invalid logical file type '{0}'")]
    InvalidFileType(String),
}
