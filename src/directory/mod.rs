//! Reference directories
//!
//! The engine resolves transaction types and currency codes through two
//! date-scoped lookups. Both are traits so callers can plug in their own
//! tables; the static defaults cover the common codes.

mod currency;
mod errors;
mod textschluessel;

use chrono::NaiveDate;

use crate::types::{Currency, Textschluessel};

pub use currency::{CurrencyEntry, StaticCurrencyDirectory};
pub use errors::{DirectoryError, DirectoryResult};
pub use textschluessel::{StaticTextschluesselDirectory, TextschluesselEntry};

/// Transaction type table
pub trait TextschluesselDirectory {
    /// The entry for `key`/`extension` valid at `date`, with its flags set.
    fn lookup(&self, key: u8, extension: u16, date: NaiveDate) -> Option<Textschluessel>;

    /// Every entry valid at `date` matching the debit/remittance filter.
    /// Variable entries are returned with extension 0.
    fn search(&self, debit: bool, remittance: bool, date: NaiveDate) -> Vec<Textschluessel>;
}

/// Currency code table
pub trait CurrencyDirectory {
    /// The one character DTAUS code of `currency` at `date`.
    fn dtaus_code(&self, currency: &Currency, date: NaiveDate) -> Option<char>;

    /// The currency a DTAUS code stands for at `date`.
    fn currency_for(&self, code: char, date: NaiveDate) -> Option<Currency>;

    /// Currencies with a DTAUS code at `date`.
    fn currencies(&self, date: NaiveDate) -> Vec<Currency>;
}

/// Inclusive validity period; open ends are unbounded.
pub(crate) fn is_valid_at(from: Option<NaiveDate>, to: Option<NaiveDate>, date: NaiveDate) -> bool {
    from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to)
}

/// Whether two inclusive periods share a day.
pub(crate) fn periods_overlap(
    a: (Option<NaiveDate>, Option<NaiveDate>),
    b: (Option<NaiveDate>, Option<NaiveDate>),
) -> bool {
    let starts_before_b_ends = match (a.0, b.1) {
        (Some(start), Some(end)) => start <= end,
        _ => true,
    };
    let b_starts_before_a_ends = match (b.0, a.1) {
        (Some(start), Some(end)) => start <= end,
        _ => true,
    };
    starts_before_b_ends && b_starts_before_a_ends
}
