//! Per-currency usage counts of a logical file

use std::collections::BTreeMap;

use crate::types::Currency;

/// How many transactions use each currency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyCounter {
    counts: BTreeMap<Currency, u64>,
}

impl CurrencyCounter {
    pub fn add(&mut self, currency: Currency) {
        *self.counts.entry(currency).or_insert(0) += 1;
    }

    /// Drops one use; currencies reaching zero disappear.
    pub fn subtract(&mut self, currency: Currency) {
        if let Some(count) = self.counts.get_mut(&currency) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&currency);
            }
        }
    }

    pub fn count(&self, currency: Currency) -> u64 {
        self.counts.get(&currency).copied().unwrap_or(0)
    }

    /// Currencies with at least one use, in code order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.counts.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
