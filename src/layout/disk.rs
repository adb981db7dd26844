//! Disk format: 128 byte blocks, DIN 66003 characters, zoned digits

use super::field::{Encoding::*, Field, FieldSpec};
use super::{ChecksumLayout, Format, FormatProfile, HeaderLayout, TransactionLayout};
use crate::codec::Charset;

const fn spec(field: Field, offset: usize, length: usize, encoding: super::Encoding) -> FieldSpec {
    FieldSpec::new(field, offset, length, encoding)
}

pub static DISK: FormatProfile = FormatProfile {
    format: Format::Disk,
    block_size: 128,
    charset: Charset::Ascii,
    header: HeaderLayout {
        record_length: spec(Field::A1, 0, 4, Digits),
        marker: spec(Field::A2, 4, 1, Text),
        file_type: spec(Field::A3, 5, 2, Text),
        bank: spec(Field::A4, 7, 8, Digits),
        bank_data: spec(Field::A5, 15, 8, Digits),
        customer: spec(Field::A6, 23, 27, Text),
        create_date: spec(Field::A7, 50, 6, ShortDate),
        account: spec(Field::A9, 60, 10, Digits),
        reference: spec(Field::A10, 70, 10, Digits),
        execution_date: spec(Field::A11b, 95, 8, LongDate),
        currency: spec(Field::A12, 127, 1, Text),
        constants: &[],
    },
    transaction: TransactionLayout {
        record_length: spec(Field::C1, 0, 4, Digits),
        marker: spec(Field::C2, 4, 1, Text),
        primary_bank: spec(Field::C3, 5, 8, Digits),
        target_bank: spec(Field::C4, 13, 8, Digits),
        target_account: spec(Field::C5, 21, 10, Digits),
        // C6 is 13 digits wide; the reference sits between two fixed zeros.
        reference: spec(Field::C6, 32, 11, Digits),
        type_key: spec(Field::C7a, 44, 2, Digits),
        type_extension: spec(Field::C7b, 46, 3, Digits),
        amount_dm: spec(Field::C9, 50, 11, Digits),
        executive_bank: spec(Field::C10, 61, 8, Digits),
        executive_account: spec(Field::C11, 69, 10, Digits),
        amount: spec(Field::C12, 79, 11, Digits),
        target_name: spec(Field::C14a, 93, 27, Text),
        executive_name: spec(Field::C15, 128, 27, Text),
        description: spec(Field::C16, 155, 27, Text),
        currency: spec(Field::C17a, 182, 1, Text),
        extension_count: spec(Field::C18, 185, 2, Digits),
        constants: &[(31, b"0"), (43, b"0")],
        base_length: 187,
        block_count: [2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6],
        inline_extensions: 2,
        inline_extension_offset: 187,
        extension_area_offset: 256,
        extensions_per_block: 4,
    },
    checksum: ChecksumLayout {
        record_length: spec(Field::E1, 0, 4, Digits),
        marker: spec(Field::E2, 4, 1, Text),
        count: spec(Field::E4, 10, 7, Digits),
        sum_amount_dm: spec(Field::E5, 17, 13, Digits),
        sum_target_account: spec(Field::E6, 30, 17, Digits),
        sum_target_bank: spec(Field::E7, 47, 17, Digits),
        sum_amount: spec(Field::E8, 64, 13, Digits),
        constants: &[],
    },
};
