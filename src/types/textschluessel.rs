//! Transaction type code (Textschluessel)

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::errors::{TypeError, TypeResult};

/// A 2-digit key plus 3-digit extension identifying the kind of payment.
///
/// Identity is the key/extension pair; the flags describe the entry as
/// found in a reference directory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Textschluessel {
    pub key: u8,
    pub extension: u16,
    #[serde(default)]
    pub debit: bool,
    #[serde(default)]
    pub remittance: bool,
    /// Whether the extension carries a variable value (e.g. 54xxx)
    #[serde(default)]
    pub variable: bool,
}

impl Textschluessel {
    pub const MAX_KEY: u8 = 99;
    pub const MAX_EXTENSION: u16 = 999;

    /// Creates a bare key/extension pair with no directory flags.
    pub fn new(key: u8, extension: u16) -> TypeResult<Self> {
        if key > Self::MAX_KEY || extension > Self::MAX_EXTENSION {
            return Err(TypeError::InvalidTextschluessel {
                key: u32::from(key),
                extension: u32::from(extension),
            });
        }
        Ok(Self {
            key,
            extension,
            debit: false,
            remittance: false,
            variable: false,
        })
    }

    pub fn with_flags(mut self, debit: bool, remittance: bool) -> Self {
        self.debit = debit;
        self.remittance = remittance;
        self
    }

    pub fn with_variable(mut self, variable: bool) -> Self {
        self.variable = variable;
        self
    }
}

impl PartialEq for Textschluessel {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.extension == other.extension
    }
}

impl Eq for Textschluessel {}

impl Hash for Textschluessel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.extension.hash(state);
    }
}

impl fmt::Display for Textschluessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:03}", self.key, self.extension)
    }
}
