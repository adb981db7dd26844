//! End-to-end scenarios on in-memory containers, run for both formats

mod common;

use common::{assert_consistent, build, header, long_transaction, transaction};
use dtaus::container::ByteContainer;
use dtaus::diagnostics::{Diagnostics, MessageKind};
use dtaus::layout::Format;
use dtaus::types::Checksum;
use dtaus::{DtausError, MemoryContainer, PhysicalFile};

const FORMATS: [Format; 2] = [Format::Disk, Format::Tape];

#[test]
fn test_scenario_a_single_transaction() {
    for format in FORMATS {
        let mut physical = build(format, &[1000]);
        let logical = physical.logical_file(0).unwrap();
        let checksum = logical.checksum();
        assert_eq!(checksum.sum_amount, 1000, "{}", format);
        assert_eq!(checksum.transaction_count, 1);
        assert_eq!(checksum.sum_target_account, 12_345_678);
        assert_eq!(checksum.sum_target_bank, 10_000_000);
        assert_consistent(&mut physical);
    }
}

#[test]
fn test_scenario_b_remove_first_of_two() {
    for format in FORMATS {
        let mut physical = build(format, &[1000, 2500]);
        let mut diagnostics = Diagnostics::strict();
        let mut logical = physical.logical_file(0).unwrap();

        let removed = logical.remove_transaction(&mut diagnostics, 0).unwrap();
        assert_eq!(removed, transaction(1000));
        assert_eq!(logical.transaction_count(), 1);
        assert_eq!(
            logical.transaction(&mut diagnostics, 0).unwrap(),
            Some(transaction(2500))
        );
        let checksum = logical.checksum();
        assert_eq!(checksum.sum_amount, 2500);
        assert_eq!(checksum.transaction_count, 1);
        assert_consistent(&mut physical);
    }
}

#[test]
fn test_scenario_c_grow_record_in_place() {
    for format in FORMATS {
        let mut physical = build(format, &[1000]);
        let profile = physical.profile();
        let mut diagnostics = Diagnostics::strict();
        let mut logical = physical.logical_file(0).unwrap();

        let before = logical.checksum_position();
        let bigger = long_transaction(1000, 9);
        let old_length = profile.transaction_length(0).unwrap();
        let new_length = profile.transaction_length(bigger.extension_count()).unwrap();
        assert!(new_length > old_length);

        let previous = logical.set_transaction(&mut diagnostics, 0, bigger.clone()).unwrap();
        assert_eq!(previous, transaction(1000));
        assert_eq!(logical.checksum_position(), before + (new_length - old_length));
        assert_eq!(logical.transaction(&mut diagnostics, 0).unwrap(), Some(bigger));
        assert_consistent(&mut physical);
    }
}

#[test]
fn test_scenario_d_checksum_mismatch() {
    for format in FORMATS {
        let physical = build(format, &[1000, 2000]);
        let profile = physical.profile();
        let mut bytes = physical.into_inner().into_bytes();

        // Rewrite the E4 transaction count as 3.
        let e_position = bytes.len() - profile.block_size as usize;
        let count = profile.checksum.count;
        let forged = build(format, &[1, 1, 1]).into_inner().into_bytes();
        let forged_e = forged.len() - profile.block_size as usize;
        bytes[e_position + count.offset..e_position + count.offset + count.length]
            .copy_from_slice(&forged[forged_e + count.offset..forged_e + count.offset + count.length]);

        let mut strict = Diagnostics::strict();
        match PhysicalFile::open(MemoryContainer::from_bytes(bytes.clone()), &mut strict) {
            Err(DtausError::Corrupted { position, kind, .. }) => {
                assert_eq!(position, e_position as u64);
                assert_eq!(kind, MessageKind::ChecksumMismatch);
            }
            other => panic!("{}: expected corruption, got {:?}", format, other.err()),
        }

        let mut lenient = Diagnostics::lenient();
        let mut physical = PhysicalFile::open(MemoryContainer::from_bytes(bytes), &mut lenient).unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient.count(MessageKind::ChecksumMismatch), 1);

        let mut logical = physical.logical_file(0).unwrap();
        assert_eq!(logical.checksum().transaction_count, 2);
        let mut again = Diagnostics::lenient();
        let recomputed = logical.recompute_checksum(&mut again).unwrap();
        assert_eq!(recomputed.sum_amount, 3000);
        assert_eq!(again.count(MessageKind::ChecksumMismatch), 1);
    }
}

#[test]
fn test_scenario_e_unrecognized_format() {
    let mut bytes = b"0129".to_vec();
    bytes.resize(128, b' ');
    for mut diagnostics in [Diagnostics::strict(), Diagnostics::lenient()] {
        let result = PhysicalFile::open(MemoryContainer::from_bytes(bytes.clone()), &mut diagnostics);
        assert!(matches!(result, Err(DtausError::UnrecognizedFormat)));
    }
}

#[test]
fn test_reopen_round_trip() {
    for format in FORMATS {
        let mut physical = build(format, &[1000]);
        physical
            .logical_file(0)
            .unwrap()
            .add_transaction(long_transaction(77, 14))
            .unwrap();
        let bytes = physical.into_inner().into_bytes();

        let mut diagnostics = Diagnostics::strict();
        let mut reopened = PhysicalFile::open(MemoryContainer::from_bytes(bytes), &mut diagnostics).unwrap();
        assert_eq!(reopened.format(), format);
        let mut logical = reopened.logical_file(0).unwrap();
        assert_eq!(logical.header(), Some(header()));
        assert_eq!(
            logical.transactions(&mut diagnostics).unwrap(),
            vec![Some(transaction(1000)), Some(long_transaction(77, 14))]
        );
        assert!(diagnostics.is_empty());
    }
}

#[test]
fn test_checksum_follows_every_mutation() {
    for format in FORMATS {
        let mut physical = build(format, &[]);
        let mut diagnostics = Diagnostics::strict();
        {
            let mut logical = physical.logical_file(0).unwrap();
            for amount in 1..=6 {
                logical.add_transaction(long_transaction(amount * 100, amount as usize)).unwrap();
            }
            logical.remove_transaction(&mut diagnostics, 2).unwrap();
            logical.set_transaction(&mut diagnostics, 0, transaction(5)).unwrap();
            logical.set_transaction(&mut diagnostics, 3, long_transaction(9, 14)).unwrap();
            logical.remove_transaction(&mut diagnostics, 4).unwrap();
        }
        assert_consistent(&mut physical);

        let logical = physical.logical_file(0).unwrap();
        let mut expected = Checksum::default();
        for t in [transaction(5), long_transaction(200, 2), long_transaction(400, 4), long_transaction(9, 14)] {
            expected.add(&t);
        }
        assert_eq!(logical.checksum(), expected);
    }
}

#[test]
fn test_set_header_keeps_transactions() {
    let mut physical = build(Format::Disk, &[1000]);
    let mut diagnostics = Diagnostics::strict();
    let mut logical = physical.logical_file(0).unwrap();

    let mut renamed = header();
    renamed.customer = common::text("NEUE FIRMA AG");
    let previous = logical.set_header(renamed.clone()).unwrap();
    assert_eq!(previous, Some(header()));
    assert_eq!(logical.header(), Some(renamed.clone()));

    let bytes = physical.into_inner().into_bytes();
    let mut reopened = PhysicalFile::open(MemoryContainer::from_bytes(bytes), &mut diagnostics).unwrap();
    let mut logical = reopened.logical_file(0).unwrap();
    assert_eq!(logical.header(), Some(renamed));
    assert_eq!(logical.transaction(&mut diagnostics, 0).unwrap(), Some(transaction(1000)));
}

#[test]
fn test_open_empty_container_is_unrecognized() {
    let mut diagnostics = Diagnostics::strict();
    assert!(matches!(
        PhysicalFile::open(MemoryContainer::new(), &mut diagnostics),
        Err(DtausError::UnrecognizedFormat)
    ));
    let physical = PhysicalFile::create(MemoryContainer::new(), Format::Tape).unwrap();
    assert_eq!(physical.logical_file_count(), 0);
    assert!(physical.container().is_empty());
}
