//! E record and checksum recomputation

use crate::container::ByteContainer;
use crate::diagnostics::{Diagnostics, Message, MessageKind};
use crate::errors::{DtausError, DtausResult};
use crate::observability::{log_event_with_fields, Event, Task};
use crate::physical::PhysicalFile;
use crate::types::Checksum;

use super::counter::CurrencyCounter;
use super::index::TransactionIndex;
use super::record::{RecordContext, RecordReader, RecordWriter};

impl<C: ByteContainer> PhysicalFile<C> {
    pub(crate) fn encode_checksum(&self, checksum: &Checksum) -> DtausResult<Vec<u8>> {
        let profile = self.profile;
        let layout = &profile.checksum;
        let mut w = RecordWriter::new(profile.block_size as usize, profile.charset);
        w.constants(layout.constants);
        w.number(&layout.record_length, profile.block_size)?;
        w.character(&layout.marker, 'E')?;
        w.number(&layout.count, checksum.transaction_count)?;
        w.number(&layout.sum_amount_dm, 0)?;
        w.number(&layout.sum_target_account, checksum.sum_target_account)?;
        w.number(&layout.sum_target_bank, checksum.sum_target_bank)?;
        w.number(&layout.sum_amount, checksum.sum_amount)?;
        Ok(w.into_bytes())
    }

    /// Writes the cached checksum of `file` to its E record.
    pub(crate) fn write_checksum(&mut self, file: usize) -> DtausResult<()> {
        let state = &self.files[file];
        let bytes = self.encode_checksum(&state.checksum)?;
        let position = state.checksum_position;
        self.container.write_at(position, &bytes)?;
        Ok(())
    }

    /// Decodes the E record at `position`; `Ok(None)` when a field was
    /// reported to a lenient context.
    pub(crate) fn read_checksum(
        &mut self,
        diagnostics: &mut Diagnostics,
        file: usize,
        position: u64,
    ) -> DtausResult<Option<Checksum>> {
        let profile = self.profile;
        let layout = &profile.checksum;
        let bytes = self.read_record(diagnostics, Some(file), position, profile.block_size)?;
        let r = RecordReader::new(&bytes, position, Some(file), profile, &self.config);

        if r.character(&layout.marker) != Some('E') {
            return Err(r.fatal(
                diagnostics,
                MessageKind::InvalidRecordType,
                &layout.marker,
                "expected checksum record 'E'",
            ));
        }
        if let Some(length) = r.number(diagnostics, &layout.record_length)? {
            if length != profile.block_size {
                r.raise(
                    diagnostics,
                    MessageKind::IllegalRecordLength,
                    &layout.record_length,
                    format!("checksum record length {} instead of {}", length, profile.block_size),
                )?;
            }
        }
        let count = r.number(diagnostics, &layout.count)?;
        let sum_target_account = r.number(diagnostics, &layout.sum_target_account)?;
        let sum_target_bank = r.number(diagnostics, &layout.sum_target_bank)?;
        let sum_amount = r.number(diagnostics, &layout.sum_amount)?;

        let (Some(transaction_count), Some(sum_target_account), Some(sum_target_bank), Some(sum_amount)) =
            (count, sum_target_account, sum_target_bank, sum_amount)
        else {
            return Ok(None);
        };
        Ok(Some(Checksum {
            transaction_count,
            sum_amount,
            sum_target_account,
            sum_target_bank,
        }))
    }

    /// Rescans a logical file from its A record to its E record.
    ///
    /// Rebuilds the header, transaction index, currency counts and the
    /// cached checksum, then compares against the stored E record. Nothing
    /// is committed when the scan fails or is cancelled.
    pub(crate) fn recompute_checksum(&mut self, diagnostics: &mut Diagnostics, file: usize) -> DtausResult<Checksum> {
        let block = self.profile.block_size;
        let header_position = self.files[file].header_position;
        let header = self.read_header(diagnostics, file)?;
        let context = header.as_ref().map(RecordContext::of);
        let end = self.container.len();

        let mut index = TransactionIndex::default();
        let mut counter = CurrencyCounter::default();
        let mut computed = Checksum::default();
        let mut position = header_position + block;
        let mut count = 0usize;

        loop {
            match self.peek_marker(diagnostics, file, position)? {
                Some('E') => break,
                Some('C') => {}
                _ => {
                    let message = Message::new(
                        MessageKind::InvalidRecordType,
                        position + self.profile.transaction.marker.offset as u64,
                        "expected transaction 'C' or checksum 'E' record",
                    )
                    .with_field(self.profile.transaction.marker.field);
                    return Err(diagnostics.fatal(Some(file), message));
                }
            }
            if count >= super::MAX_TRANSACTIONS {
                let message = Message::new(
                    MessageKind::IllegalData,
                    position,
                    format!("more than {} transactions", super::MAX_TRANSACTIONS),
                );
                return Err(diagnostics.fatal(Some(file), message));
            }

            let scanned = self.read_transaction_at(diagnostics, file, position, context)?;
            index.ensure(count, count);
            index.set(count, position - header_position);
            computed.add_raw(scanned.amount, scanned.target_account, scanned.target_bank);
            if let Some(transaction) = &scanned.transaction {
                counter.add(transaction.currency);
            }
            count += 1;
            position += scanned.length;

            self.monitor
                .progress(Task::Scan, position - header_position, end.saturating_sub(header_position));
            if self.monitor.is_cancelled() {
                return Err(DtausError::Cancelled);
            }
        }

        let checksum_position = position;
        if let Some(stored) = self.read_checksum(diagnostics, file, checksum_position)? {
            if stored != computed {
                let message = Message::new(
                    MessageKind::ChecksumMismatch,
                    checksum_position,
                    format!(
                        "stored count {} amount {} accounts {} banks {}, computed count {} amount {} accounts {} banks {}",
                        stored.transaction_count,
                        stored.sum_amount,
                        stored.sum_target_account,
                        stored.sum_target_bank,
                        computed.transaction_count,
                        computed.sum_amount,
                        computed.sum_target_account,
                        computed.sum_target_bank
                    ),
                );
                diagnostics.raise(Some(file), message)?;
                let file_str = file.to_string();
                let position_str = checksum_position.to_string();
                log_event_with_fields(
                    Event::ChecksumMismatch,
                    &[("file", &file_str), ("position", &position_str)],
                );
            }
        }

        let state = &mut self.files[file];
        state.header = header;
        state.checksum_position = checksum_position;
        state.index = index;
        state.counter = counter;
        state.checksum = computed;
        Ok(computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;
    use crate::layout::Format;
    use crate::validation::fixtures;

    fn file_with_two_transactions() -> PhysicalFile<MemoryContainer> {
        let mut diagnostics = Diagnostics::strict();
        let mut physical = PhysicalFile::create(MemoryContainer::new(), Format::Disk).unwrap();
        let file = physical.add_logical_file(&mut diagnostics, fixtures::header()).unwrap();
        let mut logical = physical.logical_file(file).unwrap();
        logical.add_transaction(fixtures::transaction()).unwrap();
        let mut second = fixtures::transaction();
        second.amount = 2500;
        logical.add_transaction(second).unwrap();
        physical
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut physical = file_with_two_transactions();
        let mut diagnostics = Diagnostics::strict();
        let first = physical.recompute_checksum(&mut diagnostics, 0).unwrap();
        let second = physical.recompute_checksum(&mut diagnostics, 0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.transaction_count, 2);
        assert_eq!(first.sum_amount, 3500);
        assert_eq!(first.sum_target_account, 2 * 12_345_678);
        assert_eq!(first.sum_target_bank, 2 * 10_000_000);
    }

    #[test]
    fn test_mismatch_strict_keeps_state() {
        let mut physical = file_with_two_transactions();
        let mut wrong = physical.files[0].checksum;
        wrong.sum_amount += 1;
        let bytes = physical.encode_checksum(&wrong).unwrap();
        let position = physical.files[0].checksum_position;
        physical.container.write_at(position, &bytes).unwrap();

        let mut strict = Diagnostics::strict();
        match physical.recompute_checksum(&mut strict, 0).unwrap_err() {
            DtausError::Corrupted { position: p, kind, .. } => {
                assert_eq!(p, position);
                assert_eq!(kind, MessageKind::ChecksumMismatch);
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut lenient = Diagnostics::lenient();
        let computed = physical.recompute_checksum(&mut lenient, 0).unwrap();
        assert_eq!(computed.sum_amount, 3500);
        assert_eq!(lenient.count(MessageKind::ChecksumMismatch), 1);
    }

    #[test]
    fn test_invalid_marker_is_fatal_in_both_policies() {
        let mut physical = file_with_two_transactions();
        let position = physical.files[0].transaction_position(0).unwrap();
        physical.container.write_at(position + 4, b"X").unwrap();

        let mut lenient = Diagnostics::lenient();
        let err = physical.recompute_checksum(&mut lenient, 0).unwrap_err();
        assert!(matches!(
            err,
            DtausError::Corrupted {
                kind: MessageKind::InvalidRecordType,
                ..
            }
        ));
        assert_eq!(lenient.count(MessageKind::InvalidRecordType), 1);
    }
}
