//! Domain values stored in DTAUS records
//!
//! Every type validates on construction (and on deserialization), so a
//! value in hand always fits its on-disk field.

mod bank;
mod checksum;
mod currency;
mod errors;
mod file_type;
mod header;
mod text;
mod textschluessel;
mod transaction;

pub use bank::{Bankleitzahl, Kontonummer, ReferenceNumber10, ReferenceNumber11};
pub use checksum::{Checksum, ACCOUNT_SUM_MODULUS, AMOUNT_SUM_MODULUS, BANK_SUM_MODULUS};
pub use currency::Currency;
pub use errors::{TypeError, TypeResult};
pub use file_type::LogicalFileType;
pub use header::Header;
pub use text::AlphaNumericText27;
pub use textschluessel::Textschluessel;
pub use transaction::{ExtensionType, Transaction, MAX_DESCRIPTIONS, MAX_EXTENSIONS};
