//! Logical file type (field A3)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{TypeError, TypeResult};

/// Kind of payments a logical file carries and who submits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogicalFileType {
    /// Remittances submitted by a customer
    GK,
    /// Debits submitted by a customer
    LK,
    /// Remittances submitted by a bank
    GB,
    /// Debits submitted by a bank
    LB,
}

impl LogicalFileType {
    pub fn code(self) -> &'static str {
        match self {
            LogicalFileType::GK => "GK",
            LogicalFileType::LK => "LK",
            LogicalFileType::GB => "GB",
            LogicalFileType::LB => "LB",
        }
    }

    pub fn parse(code: &str) -> TypeResult<Self> {
        match code {
            "GK" => Ok(LogicalFileType::GK),
            "LK" => Ok(LogicalFileType::LK),
            "GB" => Ok(LogicalFileType::GB),
            "LB" => Ok(LogicalFileType::LB),
            other => Err(TypeError::InvalidFileType(other.to_string())),
        }
    }

    /// Whether debit transaction types may be stored
    pub fn is_debit_allowed(self) -> bool {
        matches!(self, LogicalFileType::LK | LogicalFileType::LB)
    }

    /// Whether remittance transaction types may be stored
    pub fn is_remittance_allowed(self) -> bool {
        matches!(self, LogicalFileType::GK | LogicalFileType::GB)
    }

    /// Whether the file is submitted by a bank (sender bank code required)
    pub fn is_send_by_bank(self) -> bool {
        matches!(self, LogicalFileType::GB | LogicalFileType::LB)
    }
}

impl FromStr for LogicalFileType {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LogicalFileType {
    type Error = TypeError;

    fn try_from(code: String) -> TypeResult<Self> {
        Self::parse(&code)
    }
}

impl From<LogicalFileType> for String {
    fn from(file_type: LogicalFileType) -> String {
        file_type.code().to_string()
    }
}

impl fmt::Display for LogicalFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
