//! Shared builders for the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;

use dtaus::container::ByteContainer;
use dtaus::diagnostics::Diagnostics;
use dtaus::layout::Format;
use dtaus::types::{
    AlphaNumericText27, Bankleitzahl, Currency, Header, Kontonummer, LogicalFileType,
    ReferenceNumber10, ReferenceNumber11, Textschluessel, Transaction,
};
use dtaus::{MemoryContainer, PhysicalFile};

pub fn text(s: &str) -> AlphaNumericText27 {
    AlphaNumericText27::parse(s).unwrap()
}

pub fn header() -> Header {
    Header {
        file_type: LogicalFileType::GK,
        bank: Bankleitzahl::new(10_000_000).unwrap(),
        bank_data: None,
        customer: text("ACME GMBH"),
        account: Kontonummer::new(1_234_567).unwrap(),
        create_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        execution_date: NaiveDate::from_ymd_opt(2024, 3, 5),
        currency: Currency::EUR,
        reference: ReferenceNumber10::new(42).unwrap(),
    }
}

pub fn transaction(amount: u64) -> Transaction {
    Transaction {
        textschluessel: Textschluessel::new(51, 0).unwrap(),
        primary_bank: None,
        target_bank: Bankleitzahl::new(10_000_000).unwrap(),
        target_account: Kontonummer::new(12_345_678).unwrap(),
        executive_bank: Bankleitzahl::new(20_000_000).unwrap(),
        executive_account: Kontonummer::new(1_234_567).unwrap(),
        reference: ReferenceNumber11::new(7).unwrap(),
        amount,
        currency: Currency::EUR,
        target_name: text("MAX MUSTERMANN"),
        target_ext: None,
        executive_name: text("ACME GMBH"),
        executive_ext: None,
        descriptions: vec![text("RECHNUNG 4711")],
    }
}

/// A transaction with `lines` description lines and both name extensions
pub fn long_transaction(amount: u64, lines: usize) -> Transaction {
    let mut t = transaction(amount);
    t.descriptions = (0..lines).map(|n| text(&format!("ZEILE {}", n))).collect();
    t.target_ext = Some(text("C/O MUSTERFRAU"));
    t.executive_ext = Some(text("ABT. BUCHHALTUNG"));
    t
}

/// A physical file with one logical file holding the given amounts
pub fn build(format: Format, amounts: &[u64]) -> PhysicalFile<MemoryContainer> {
    let mut diagnostics = Diagnostics::strict();
    let mut physical = PhysicalFile::create(MemoryContainer::new(), format).unwrap();
    let file = physical.add_logical_file(&mut diagnostics, header()).unwrap();
    let mut logical = physical.logical_file(file).unwrap();
    for &amount in amounts {
        logical.add_transaction(transaction(amount)).unwrap();
    }
    physical
}

/// Checks the structural invariants of every logical file: records sit
/// where the index says, files are contiguous and the cached checksum
/// matches a fresh rescan.
pub fn assert_consistent(physical: &mut PhysicalFile<MemoryContainer>) {
    let profile = physical.profile();
    let marker = profile.transaction.marker.offset;
    let block = profile.block_size;
    let mut expected_header = 0;
    for i in 0..physical.logical_file_count() {
        let (count, positions, checksum_position, cached) = {
            let logical = physical.logical_file(i).unwrap();
            assert_eq!(logical.header_position(), expected_header, "logical file {}", i);
            let count = logical.transaction_count();
            let positions: Vec<u64> = (0..count)
                .map(|t| logical.transaction_position(t).unwrap())
                .collect();
            (count, positions, logical.checksum_position(), logical.checksum())
        };
        let bytes = physical.container().as_bytes();
        for &p in &positions {
            assert_eq!(bytes[(p as usize) + marker], profile.marker_byte('C'));
        }
        assert_eq!(bytes[checksum_position as usize + marker], profile.marker_byte('E'));

        let mut diagnostics = Diagnostics::strict();
        let mut logical = physical.logical_file(i).unwrap();
        let rescanned = logical.recompute_checksum(&mut diagnostics).unwrap();
        assert_eq!(rescanned, cached);
        assert_eq!(rescanned.transaction_count as usize, count);
        expected_header = checksum_position + block;
    }
    assert_eq!(physical.container().len(), expected_header);
}
