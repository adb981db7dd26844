//! Static currency table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{DirectoryError, DirectoryResult};
use super::{is_valid_at, periods_overlap, CurrencyDirectory};
use crate::types::Currency;

/// One row of the currency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub currency: Currency,
    /// Character stored in A12 and C17a
    pub code: char,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

fn builtin_entries() -> Vec<CurrencyEntry> {
    vec![
        CurrencyEntry {
            currency: Currency::EUR,
            code: '1',
            valid_from: NaiveDate::from_ymd_opt(1999, 1, 1),
            valid_to: None,
        },
        CurrencyEntry {
            currency: Currency::DEM,
            code: ' ',
            valid_from: None,
            valid_to: NaiveDate::from_ymd_opt(2001, 12, 31),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct StaticCurrencyDirectory {
    entries: Vec<CurrencyEntry>,
}

impl StaticCurrencyDirectory {
    /// Builds a table; a code may map to one currency per day only.
    pub fn from_entries(entries: Vec<CurrencyEntry>) -> DirectoryResult<Self> {
        for (i, entry) in entries.iter().enumerate() {
            let clash = entries[..i].iter().any(|other| {
                (other.code == entry.code || other.currency == entry.currency)
                    && periods_overlap(
                        (other.valid_from, other.valid_to),
                        (entry.valid_from, entry.valid_to),
                    )
            });
            if clash {
                return Err(DirectoryError::DuplicateCurrencyEntry { code: entry.code });
            }
        }
        Ok(Self { entries })
    }

    fn valid_at(&self, date: NaiveDate) -> impl Iterator<Item = &CurrencyEntry> {
        self.entries
            .iter()
            .filter(move |e| is_valid_at(e.valid_from, e.valid_to, date))
    }
}

impl Default for StaticCurrencyDirectory {
    fn default() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }
}

impl CurrencyDirectory for StaticCurrencyDirectory {
    fn dtaus_code(&self, currency: &Currency, date: NaiveDate) -> Option<char> {
        self.valid_at(date)
            .find(|e| e.currency == *currency)
            .map(|e| e.code)
    }

    fn currency_for(&self, code: char, date: NaiveDate) -> Option<Currency> {
        self.valid_at(date).find(|e| e.code == code).map(|e| e.currency)
    }

    fn currencies(&self, date: NaiveDate) -> Vec<Currency> {
        self.valid_at(date).map(|e| e.currency).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builtin_table_is_consistent() {
        assert!(StaticCurrencyDirectory::from_entries(builtin_entries()).is_ok());
    }

    #[test]
    fn test_euro_code() {
        let directory = StaticCurrencyDirectory::default();
        assert_eq!(directory.dtaus_code(&Currency::EUR, date(2024, 1, 1)), Some('1'));
        assert_eq!(directory.dtaus_code(&Currency::EUR, date(1998, 12, 31)), None);
        assert_eq!(directory.currency_for('1', date(2024, 1, 1)), Some(Currency::EUR));
    }

    #[test]
    fn test_mark_code_ends_2001() {
        let directory = StaticCurrencyDirectory::default();
        assert_eq!(directory.currency_for(' ', date(2001, 12, 31)), Some(Currency::DEM));
        assert_eq!(directory.currency_for(' ', date(2002, 1, 1)), None);
        assert_eq!(directory.dtaus_code(&Currency::DEM, date(2002, 1, 1)), None);
    }

    #[test]
    fn test_currencies_at_date() {
        let directory = StaticCurrencyDirectory::default();
        assert_eq!(directory.currencies(date(2000, 6, 1)).len(), 2);
        assert_eq!(directory.currencies(date(2010, 6, 1)), vec![Currency::EUR]);
    }

    #[test]
    fn test_rejects_code_clash() {
        let entries = vec![
            CurrencyEntry {
                currency: Currency::EUR,
                code: '1',
                valid_from: None,
                valid_to: None,
            },
            CurrencyEntry {
                currency: Currency::DEM,
                code: '1',
                valid_from: None,
                valid_to: None,
            },
        ];
        let err = StaticCurrencyDirectory::from_entries(entries).unwrap_err();
        assert_eq!(err, DirectoryError::DuplicateCurrencyEntry { code: '1' });
    }
}
