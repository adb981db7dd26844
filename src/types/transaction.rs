//! Payment transaction (C record)

use serde::{Deserialize, Serialize};

use super::bank::{Bankleitzahl, Kontonummer, ReferenceNumber11};
use super::currency::Currency;
use super::text::AlphaNumericText27;
use super::textschluessel::Textschluessel;

/// Most description lines a transaction can carry (one in the core
/// record, thirteen in extension parts)
pub const MAX_DESCRIPTIONS: usize = 14;

/// Most extension parts a transaction record can carry
pub const MAX_EXTENSIONS: usize = 15;

/// Kind of an extension part, stored as a two digit tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionType {
    TargetName,
    Description,
    ExecutiveName,
}

impl ExtensionType {
    pub fn code(self) -> u64 {
        match self {
            ExtensionType::TargetName => 1,
            ExtensionType::Description => 2,
            ExtensionType::ExecutiveName => 3,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(ExtensionType::TargetName),
            2 => Some(ExtensionType::Description),
            3 => Some(ExtensionType::ExecutiveName),
            _ => None,
        }
    }
}

/// One payment. Not cached by the engine; every read materializes a
/// fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub textschluessel: Textschluessel,
    /// First involved bank, if different from the target bank
    #[serde(default)]
    pub primary_bank: Option<Bankleitzahl>,
    pub target_bank: Bankleitzahl,
    pub target_account: Kontonummer,
    pub executive_bank: Bankleitzahl,
    pub executive_account: Kontonummer,
    #[serde(default)]
    pub reference: ReferenceNumber11,
    /// Amount in cents
    pub amount: u64,
    pub currency: Currency,
    pub target_name: AlphaNumericText27,
    #[serde(default)]
    pub target_ext: Option<AlphaNumericText27>,
    pub executive_name: AlphaNumericText27,
    #[serde(default)]
    pub executive_ext: Option<AlphaNumericText27>,
    #[serde(default)]
    pub descriptions: Vec<AlphaNumericText27>,
}

impl Transaction {
    /// Number of extension parts the record needs.
    pub fn extension_count(&self) -> usize {
        self.descriptions.len().saturating_sub(1)
            + usize::from(self.target_ext.is_some())
            + usize::from(self.executive_ext.is_some())
    }

    /// Extension parts in on-disk order: target name extension, description
    /// lines after the first, executive name extension.
    pub fn extensions(&self) -> Vec<(ExtensionType, &AlphaNumericText27)> {
        let mut parts = Vec::with_capacity(self.extension_count());
        if let Some(ext) = &self.target_ext {
            parts.push((ExtensionType::TargetName, ext));
        }
        for line in self.descriptions.iter().skip(1) {
            parts.push((ExtensionType::Description, line));
        }
        if let Some(ext) = &self.executive_ext {
            parts.push((ExtensionType::ExecutiveName, ext));
        }
        parts
    }
}
