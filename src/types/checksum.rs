//! Logical file checksum (E record)
//!
//! Sums wrap at the capacity of their on-disk field so that the in-memory
//! value is always writable: 13 digits for amounts, 17 digits for account
//! numbers and bank codes.

use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Capacity of the amount sum field
pub const AMOUNT_SUM_MODULUS: u64 = 10_000_000_000_000;
/// Capacity of the account sum field
pub const ACCOUNT_SUM_MODULUS: u64 = 100_000_000_000_000_000;
/// Capacity of the bank sum field
pub const BANK_SUM_MODULUS: u64 = ACCOUNT_SUM_MODULUS;

/// Running totals over all transactions of one logical file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    pub transaction_count: u64,
    pub sum_amount: u64,
    pub sum_target_account: u64,
    pub sum_target_bank: u64,
}

impl Checksum {
    /// Adds a transaction's contribution.
    pub fn add(&mut self, transaction: &Transaction) {
        self.add_raw(
            transaction.amount,
            transaction.target_account.value(),
            transaction.target_bank.value(),
        );
    }

    /// Removes a transaction's contribution.
    pub fn subtract(&mut self, transaction: &Transaction) {
        self.subtract_raw(
            transaction.amount,
            transaction.target_account.value(),
            transaction.target_bank.value(),
        );
    }

    /// Adds a contribution from raw field values.
    pub fn add_raw(&mut self, amount: u64, target_account: u64, target_bank: u64) {
        self.transaction_count += 1;
        self.sum_amount = wrapping_add(self.sum_amount, amount, AMOUNT_SUM_MODULUS);
        self.sum_target_account =
            wrapping_add(self.sum_target_account, target_account, ACCOUNT_SUM_MODULUS);
        self.sum_target_bank = wrapping_add(self.sum_target_bank, target_bank, BANK_SUM_MODULUS);
    }

    /// Removes a contribution given as raw field values.
    pub fn subtract_raw(&mut self, amount: u64, target_account: u64, target_bank: u64) {
        self.transaction_count = self.transaction_count.saturating_sub(1);
        self.sum_amount = wrapping_sub(self.sum_amount, amount, AMOUNT_SUM_MODULUS);
        self.sum_target_account =
            wrapping_sub(self.sum_target_account, target_account, ACCOUNT_SUM_MODULUS);
        self.sum_target_bank = wrapping_sub(self.sum_target_bank, target_bank, BANK_SUM_MODULUS);
    }
}

fn wrapping_add(sum: u64, value: u64, modulus: u64) -> u64 {
    ((u128::from(sum) + u128::from(value)) % u128::from(modulus)) as u64
}

fn wrapping_sub(sum: u64, value: u64, modulus: u64) -> u64 {
    let value = value % modulus;
    ((u128::from(sum) + u128::from(modulus) - u128::from(value)) % u128::from(modulus)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_subtract_inverse() {
        let mut checksum = Checksum::default();
        checksum.add_raw(1000, 12_345_678, 10_000_000);
        checksum.add_raw(250, 1, 20_000_000);
        checksum.subtract_raw(1000, 12_345_678, 10_000_000);

        assert_eq!(checksum.transaction_count, 1);
        assert_eq!(checksum.sum_amount, 250);
        assert_eq!(checksum.sum_target_account, 1);
        assert_eq!(checksum.sum_target_bank, 20_000_000);
    }

    #[test]
    fn test_amount_sum_wraps() {
        let mut checksum = Checksum {
            sum_amount: AMOUNT_SUM_MODULUS - 1,
            ..Checksum::default()
        };
        checksum.add_raw(2, 0, 0);
        assert_eq!(checksum.sum_amount, 1);
        checksum.subtract_raw(2, 0, 0);
        assert_eq!(checksum.sum_amount, AMOUNT_SUM_MODULUS - 1);
    }

    #[test]
    fn test_account_and_bank_sums_keep_high_digits() {
        let mut checksum = Checksum::default();
        for _ in 0..20 {
            checksum.add_raw(1, 9_999_999_999, 99_999_999);
        }
        assert_eq!(checksum.sum_target_account, 199_999_999_980);
        assert_eq!(checksum.sum_target_bank, 1_999_999_980);

        let mut full = Checksum {
            sum_target_account: ACCOUNT_SUM_MODULUS - 1,
            sum_target_bank: BANK_SUM_MODULUS - 1,
            ..Checksum::default()
        };
        full.add_raw(0, 2, 2);
        assert_eq!(full.sum_target_account, 1);
        assert_eq!(full.sum_target_bank, 1);
    }

    #[test]
    fn test_equality_detects_difference() {
        let mut a = Checksum::default();
        let mut b = Checksum::default();
        a.add_raw(1, 1, 10_000_000);
        b.add_raw(2, 1, 10_000_000);
        assert_ne!(a, b);
    }
}
