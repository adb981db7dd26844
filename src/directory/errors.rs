//! Reference directory errors

use thiserror::Error;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failure while loading a reference table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("duplicate transaction type entry {key:02}{extension:03}")]
    DuplicateTypeCodeEntry { key: u8, extension: u16 },

    #[error("duplicate currency entry for code '{code}' in overlapping periods")]
    DuplicateCurrencyEntry { code: char },

    #[error("illegal directory entry: {0}")]
    IllegalEntry(String),
}

impl DirectoryError {
    pub fn code(&self) -> &'static str {
        match self {
            DirectoryError::DuplicateTypeCodeEntry { .. } => "DTAUS_DUPLICATE_TYPE_CODE_ENTRY",
            DirectoryError::DuplicateCurrencyEntry { .. } => "DTAUS_DUPLICATE_CURRENCY_ENTRY",
            DirectoryError::IllegalEntry(_) => "DTAUS_ILLEGAL_DIRECTORY_ENTRY",
        }
    }
}
