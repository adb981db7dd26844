//! Cached state of one logical file

use super::counter::CurrencyCounter;
use super::index::TransactionIndex;
use crate::types::{Checksum, Header};

#[derive(Debug, Clone)]
pub(crate) struct LogicalFileState {
    /// Absolute position of the A record
    pub header_position: u64,
    /// Absolute position of the E record
    pub checksum_position: u64,
    pub index: TransactionIndex,
    /// `None` when the A record could not be read
    pub header: Option<Header>,
    pub checksum: Checksum,
    pub counter: CurrencyCounter,
}

impl LogicalFileState {
    /// State for a file whose records still have to be scanned.
    pub fn unscanned(header_position: u64, block_size: u64) -> Self {
        Self {
            header_position,
            checksum_position: header_position + block_size,
            index: TransactionIndex::default(),
            header: None,
            checksum: Checksum::default(),
            counter: CurrencyCounter::default(),
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.checksum.transaction_count as usize
    }

    /// Absolute position of transaction `i`
    pub fn transaction_position(&self, i: usize) -> Option<u64> {
        self.index.get(i).map(|offset| self.header_position + offset)
    }

    /// First byte after the E record
    pub fn end_position(&self, block_size: u64) -> u64 {
        self.checksum_position + block_size
    }
}
