//! Transaction mutations
//!
//! Every mutation keeps the E record in step: the cached checksum and
//! currency counts are updated incrementally and the E record rewritten
//! before returning.

use crate::container::ByteContainer;
use crate::diagnostics::{Diagnostics, MessageKind};
use crate::errors::{DtausError, DtausResult};
use crate::observability::{log_event_with_fields, Event};
use crate::physical::PhysicalFile;
use crate::types::Transaction;

use super::index::MAX_TRANSACTIONS;
use super::transaction::ScannedTransaction;

impl<C: ByteContainer> PhysicalFile<C> {
    fn check_transaction_index(&self, file: usize, i: usize) -> DtausResult<u64> {
        let state = &self.files[file];
        let count = state.transaction_count();
        if i >= count {
            return Err(DtausError::IndexOutOfBounds { index: i, len: count });
        }
        state
            .transaction_position(i)
            .ok_or(DtausError::IndexOutOfBounds { index: i, len: count })
    }

    /// Reads transaction `i`; an unreadable record is an error here even
    /// in a lenient context since its replacement would be computed from it.
    fn read_existing(
        &mut self,
        diagnostics: &mut Diagnostics,
        file: usize,
        i: usize,
    ) -> DtausResult<(u64, ScannedTransaction, Transaction)> {
        let position = self.check_transaction_index(file, i)?;
        let context = self.record_context(file);
        let scanned = self.read_transaction_at(diagnostics, file, position, context)?;
        let Some(transaction) = scanned.transaction.clone() else {
            return Err(DtausError::Corrupted {
                position,
                file: Some(file),
                kind: MessageKind::IllegalData,
                detail: format!("transaction {} is unreadable", i),
            });
        };
        Ok((position, scanned, transaction))
    }

    pub(crate) fn get_transaction(
        &mut self,
        diagnostics: &mut Diagnostics,
        file: usize,
        i: usize,
    ) -> DtausResult<Option<Transaction>> {
        let position = self.check_transaction_index(file, i)?;
        let context = self.record_context(file);
        Ok(self
            .read_transaction_at(diagnostics, file, position, context)?
            .transaction)
    }

    /// Appends a transaction directly before the E record.
    pub(crate) fn add_transaction(&mut self, file: usize, transaction: Transaction) -> DtausResult<usize> {
        self.validate_transaction(file, &transaction)?;
        let context = self.require_context(file)?;
        let count = self.files[file].transaction_count();
        if count + 1 > MAX_TRANSACTIONS {
            return Err(DtausError::IndexOutOfBounds {
                index: count,
                len: MAX_TRANSACTIONS,
            });
        }
        let bytes = self.encode_transaction(&transaction, context)?;
        let position = self.files[file].checksum_position;
        self.insert_bytes(position, bytes.len() as u64)?;
        self.container.write_at(position, &bytes)?;

        let state = &mut self.files[file];
        let offset = position - state.header_position;
        state.index.ensure(count, count);
        state.index.set(count, offset);
        state.counter.add(transaction.currency);
        state.checksum.add(&transaction);
        self.write_checksum(file)?;

        log_transaction(Event::TransactionAdded, file, count, position);
        Ok(count)
    }

    /// Replaces transaction `i`, growing or shrinking its record in place.
    pub(crate) fn set_transaction(
        &mut self,
        diagnostics: &mut Diagnostics,
        file: usize,
        i: usize,
        transaction: Transaction,
    ) -> DtausResult<Transaction> {
        self.validate_transaction(file, &transaction)?;
        let context = self.require_context(file)?;
        let (position, old, previous) = self.read_existing(diagnostics, file, i)?;
        let bytes = self.encode_transaction(&transaction, context)?;
        let new_length = bytes.len() as u64;

        if new_length > old.length {
            self.insert_bytes(position + old.length, new_length - old.length)?;
        } else if new_length < old.length {
            self.remove_bytes(position + new_length, old.length - new_length)?;
        }
        self.files[file]
            .index
            .shift_after(i, new_length as i64 - old.length as i64);
        self.container.write_at(position, &bytes)?;

        let state = &mut self.files[file];
        state.counter.subtract(previous.currency);
        state.counter.add(transaction.currency);
        state.checksum.subtract(&previous);
        state.checksum.add(&transaction);
        self.write_checksum(file)?;

        log_transaction(Event::TransactionUpdated, file, i, position);
        Ok(previous)
    }

    /// Removes transaction `i` and closes the gap.
    pub(crate) fn remove_transaction(
        &mut self,
        diagnostics: &mut Diagnostics,
        file: usize,
        i: usize,
    ) -> DtausResult<Transaction> {
        let (position, old, previous) = self.read_existing(diagnostics, file, i)?;
        self.remove_bytes(position, old.length)?;

        let state = &mut self.files[file];
        state.index.remove(i, old.length);
        state.counter.subtract(previous.currency);
        state.checksum.subtract(&previous);
        self.write_checksum(file)?;

        log_transaction(Event::TransactionRemoved, file, i, position);
        Ok(previous)
    }
}

fn log_transaction(event: Event, file: usize, index: usize, position: u64) {
    let file_str = file.to_string();
    let index_str = index.to_string();
    let position_str = position.to_string();
    log_event_with_fields(
        event,
        &[
            ("file", &file_str),
            ("index", &index_str),
            ("position", &position_str),
        ],
    );
}
