//! Logical file header (A record)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bank::{Bankleitzahl, Kontonummer, ReferenceNumber10};
use super::currency::Currency;
use super::file_type::LogicalFileType;
use super::text::AlphaNumericText27;

/// Header of one logical file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "type")]
    pub file_type: LogicalFileType,
    /// Bank receiving the file
    pub bank: Bankleitzahl,
    /// Submitting bank; present only for bank-submitted files
    #[serde(default)]
    pub bank_data: Option<Bankleitzahl>,
    pub customer: AlphaNumericText27,
    pub account: Kontonummer,
    pub create_date: NaiveDate,
    #[serde(default)]
    pub execution_date: Option<NaiveDate>,
    pub currency: Currency,
    #[serde(default)]
    pub reference: ReferenceNumber10,
}
