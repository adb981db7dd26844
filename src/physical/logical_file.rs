//! Handle on one logical file

use crate::container::ByteContainer;
use crate::diagnostics::Diagnostics;
use crate::engine::CurrencyCounter;
use crate::errors::DtausResult;
use crate::types::{Checksum, Header, Transaction};

use super::PhysicalFile;

/// A logical file inside a `PhysicalFile`.
///
/// Borrows the physical file mutably: mutations shift bytes for every
/// logical file behind this one.
pub struct LogicalFile<'a, C: ByteContainer> {
    physical: &'a mut PhysicalFile<C>,
    file: usize,
}

impl<'a, C: ByteContainer> LogicalFile<'a, C> {
    pub(crate) fn new(physical: &'a mut PhysicalFile<C>, file: usize) -> Self {
        Self { physical, file }
    }

    /// Position of this file in its physical file
    pub fn index(&self) -> usize {
        self.file
    }

    /// The decoded A record, `None` if it was unreadable in a lenient scan.
    pub fn header(&self) -> Option<Header> {
        self.physical.files[self.file].header.clone()
    }

    /// Validates and writes a new A record. Returns the previous header.
    pub fn set_header(&mut self, header: Header) -> DtausResult<Option<Header>> {
        self.physical.set_header(self.file, header)
    }

    /// The cached checksum, always in step with the E record after a
    /// successful mutation.
    pub fn checksum(&self) -> Checksum {
        self.physical.files[self.file].checksum
    }

    /// Rescans the file and compares against the stored E record.
    pub fn recompute_checksum(&mut self, diagnostics: &mut Diagnostics) -> DtausResult<Checksum> {
        self.physical.recompute_checksum(diagnostics, self.file)
    }

    pub fn transaction_count(&self) -> usize {
        self.physical.files[self.file].transaction_count()
    }

    /// Appends a transaction; returns its index.
    pub fn add_transaction(&mut self, transaction: Transaction) -> DtausResult<usize> {
        self.physical.add_transaction(self.file, transaction)
    }

    /// Reads transaction `i`; `None` when a lenient read reported a problem.
    pub fn transaction(&mut self, diagnostics: &mut Diagnostics, i: usize) -> DtausResult<Option<Transaction>> {
        self.physical.get_transaction(diagnostics, self.file, i)
    }

    /// Replaces transaction `i`; returns the previous one.
    pub fn set_transaction(
        &mut self,
        diagnostics: &mut Diagnostics,
        i: usize,
        transaction: Transaction,
    ) -> DtausResult<Transaction> {
        self.physical
            .set_transaction(diagnostics, self.file, i, transaction)
    }

    /// Removes transaction `i`; later transactions move down one index.
    pub fn remove_transaction(&mut self, diagnostics: &mut Diagnostics, i: usize) -> DtausResult<Transaction> {
        self.physical.remove_transaction(diagnostics, self.file, i)
    }

    /// All transactions in order.
    pub fn transactions(&mut self, diagnostics: &mut Diagnostics) -> DtausResult<Vec<Option<Transaction>>> {
        (0..self.transaction_count())
            .map(|i| self.transaction(diagnostics, i))
            .collect()
    }

    pub fn header_position(&self) -> u64 {
        self.physical.files[self.file].header_position
    }

    pub fn checksum_position(&self) -> u64 {
        self.physical.files[self.file].checksum_position
    }

    /// Absolute position of transaction `i`
    pub fn transaction_position(&self, i: usize) -> Option<u64> {
        let state = &self.physical.files[self.file];
        if i < state.transaction_count() {
            state.transaction_position(i)
        } else {
            None
        }
    }

    /// Currencies used by the transactions of this file
    pub fn currency_counter(&self) -> &CurrencyCounter {
        &self.physical.files[self.file].counter
    }
}
