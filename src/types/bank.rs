//! Bank codes, account numbers and reference numbers
//!
//! All four are plain numbers with a fixed maximum width. They are checked
//! once on construction; afterwards any value in hand is writable.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{TypeError, TypeResult};

/// German bank code (Bankleitzahl): 8 digits, first digit is the clearing
/// area and must be 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Bankleitzahl(u32);

impl Bankleitzahl {
    pub const MAX: u64 = 99_999_999;

    pub fn new(value: u64) -> TypeResult<Self> {
        let clearing_area = value / 10_000_000;
        if value > Self::MAX || !(1..=8).contains(&clearing_area) {
            return Err(TypeError::InvalidBankCode(value));
        }
        Ok(Self(value as u32))
    }

    pub fn value(self) -> u64 {
        u64::from(self.0)
    }

    /// First digit of the code
    pub fn clearing_area(self) -> u8 {
        (self.0 / 10_000_000) as u8
    }
}

impl TryFrom<u64> for Bankleitzahl {
    type Error = TypeError;

    fn try_from(value: u64) -> TypeResult<Self> {
        Self::new(value)
    }
}

impl From<Bankleitzahl> for u64 {
    fn from(blz: Bankleitzahl) -> u64 {
        blz.value()
    }
}

impl fmt::Display for Bankleitzahl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

/// Account number (Kontonummer): 1..=10 digits, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Kontonummer(u64);

impl Kontonummer {
    pub const MAX: u64 = 9_999_999_999;

    pub fn new(value: u64) -> TypeResult<Self> {
        if value == 0 || value > Self::MAX {
            return Err(TypeError::InvalidAccountNumber(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Kontonummer {
    type Error = TypeError;

    fn try_from(value: u64) -> TypeResult<Self> {
        Self::new(value)
    }
}

impl From<Kontonummer> for u64 {
    fn from(account: Kontonummer) -> u64 {
        account.0
    }
}

impl fmt::Display for Kontonummer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

macro_rules! reference_number {
    ($(#[$doc:meta])* $name:ident, $digits:expr, $max:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "u64", into = "u64")]
        pub struct $name(u64);

        impl $name {
            pub const DIGITS: usize = $digits;
            pub const MAX: u64 = $max;

            pub fn new(value: u64) -> TypeResult<Self> {
                if value > Self::MAX {
                    return Err(TypeError::InvalidReferenceNumber {
                        value,
                        digits: Self::DIGITS,
                    });
                }
                Ok(Self(value))
            }

            pub fn value(self) -> u64 {
                self.0
            }

            /// Whether no reference is set
            pub fn is_none(self) -> bool {
                self.0 == 0
            }
        }

        impl TryFrom<u64> for $name {
            type Error = TypeError;

            fn try_from(value: u64) -> TypeResult<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for u64 {
            fn from(reference: $name) -> u64 {
                reference.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:0width$}", self.0, width = Self::DIGITS)
            }
        }
    };
}

reference_number!(
    /// Ten digit reference number of a logical file; zero means none.
    ReferenceNumber10,
    10,
    9_999_999_999
);

reference_number!(
    /// Eleven digit reference number of a transaction; zero means none.
    ReferenceNumber11,
    11,
    99_999_999_999
);
