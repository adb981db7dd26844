//! Tape format: 150 byte blocks, EBCDIC characters, packed and binary
//! numerics

use super::field::{Encoding::*, Field, FieldSpec};
use super::{ChecksumLayout, Format, FormatProfile, HeaderLayout, TransactionLayout};
use crate::codec::Charset;

const fn spec(field: Field, offset: usize, length: usize, encoding: super::Encoding) -> FieldSpec {
    FieldSpec::new(field, offset, length, encoding)
}

const UNSIGNED: super::Encoding = Packed { signed: false };
const SIGNED: super::Encoding = Packed { signed: true };

/// Second half of the record descriptor word, always binary zero
const RESERVED: &[(usize, &[u8])] = &[(2, &[0x00, 0x00])];

pub static TAPE: FormatProfile = FormatProfile {
    format: Format::Tape,
    block_size: 150,
    charset: Charset::Ebcdic,
    header: HeaderLayout {
        record_length: spec(Field::A1, 0, 2, Binary),
        marker: spec(Field::A2, 4, 1, Text),
        file_type: spec(Field::A3, 5, 2, Text),
        bank: spec(Field::A4, 7, 4, UNSIGNED),
        bank_data: spec(Field::A5, 11, 4, UNSIGNED),
        customer: spec(Field::A6, 15, 27, Text),
        create_date: spec(Field::A7, 42, 6, ShortDate),
        account: spec(Field::A9, 52, 5, UNSIGNED),
        reference: spec(Field::A10, 57, 5, UNSIGNED),
        execution_date: spec(Field::A11b, 77, 8, LongDate),
        currency: spec(Field::A12, 109, 1, Text),
        constants: RESERVED,
    },
    transaction: TransactionLayout {
        record_length: spec(Field::C1, 0, 2, Binary),
        marker: spec(Field::C2, 4, 1, Text),
        primary_bank: spec(Field::C3, 5, 4, UNSIGNED),
        target_bank: spec(Field::C4, 9, 4, UNSIGNED),
        target_account: spec(Field::C5, 13, 5, UNSIGNED),
        reference: spec(Field::C6, 18, 6, UNSIGNED),
        type_key: spec(Field::C7a, 24, 1, UNSIGNED),
        type_extension: spec(Field::C7b, 25, 2, SIGNED),
        amount_dm: spec(Field::C9, 28, 6, SIGNED),
        executive_bank: spec(Field::C10, 34, 4, UNSIGNED),
        executive_account: spec(Field::C11, 38, 5, UNSIGNED),
        amount: spec(Field::C12, 43, 6, SIGNED),
        target_name: spec(Field::C14a, 52, 27, Text),
        executive_name: spec(Field::C15, 87, 27, Text),
        description: spec(Field::C16, 114, 27, Text),
        currency: spec(Field::C17a, 141, 1, Text),
        extension_count: spec(Field::C18, 144, 2, Digits),
        constants: RESERVED,
        base_length: 146,
        block_count: [1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4],
        inline_extensions: 0,
        inline_extension_offset: 146,
        extension_area_offset: 150,
        extensions_per_block: 5,
    },
    checksum: ChecksumLayout {
        record_length: spec(Field::E1, 0, 2, Binary),
        marker: spec(Field::E2, 4, 1, Text),
        count: spec(Field::E4, 10, 4, SIGNED),
        sum_amount_dm: spec(Field::E5, 14, 7, SIGNED),
        sum_target_account: spec(Field::E6, 21, 9, SIGNED),
        sum_target_bank: spec(Field::E7, 30, 9, SIGNED),
        sum_amount: spec(Field::E8, 39, 7, SIGNED),
        constants: RESERVED,
    },
};
