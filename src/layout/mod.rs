//! Record layout tables
//!
//! A `FormatProfile` is everything that differs between the disk and the
//! tape encoding: block size, character set, where each field lives and
//! how it is encoded, and how extension parts are distributed over
//! continuation blocks. The engine is written once against this record;
//! format differences are data, not code.
//!
//! # Records
//!
//! ```text
//! A  header      one block
//! C  transaction block_count(n) blocks, n = number of extension parts
//! E  checksum    one block
//! ```

mod disk;
mod field;
mod tape;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::Charset;
use crate::types::MAX_EXTENSIONS;

pub use disk::DISK;
pub use field::{Encoding, Field, FieldSpec};
pub use tape::TAPE;

/// Length of one extension part: 2 byte type tag + 27 byte value
pub const EXTENSION_LENGTH: usize = 29;
/// Length of an extension part's type tag
pub const EXTENSION_TYPE_LENGTH: usize = 2;
/// Length of an extension part's value
pub const EXTENSION_VALUE_LENGTH: usize = 27;

/// Physical encoding of a DTAUS file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Disk,
    Tape,
}

impl Format {
    pub fn profile(self) -> &'static FormatProfile {
        match self {
            Format::Disk => &DISK,
            Format::Tape => &TAPE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Disk => "disk",
            Format::Tape => "tape",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed bytes written into every fresh record of a kind
pub type Constants = &'static [(usize, &'static [u8])];

/// A record (header)
#[derive(Debug)]
pub struct HeaderLayout {
    pub record_length: FieldSpec,
    pub marker: FieldSpec,
    pub file_type: FieldSpec,
    pub bank: FieldSpec,
    pub bank_data: FieldSpec,
    pub customer: FieldSpec,
    pub create_date: FieldSpec,
    pub account: FieldSpec,
    pub reference: FieldSpec,
    pub execution_date: FieldSpec,
    pub currency: FieldSpec,
    pub constants: Constants,
}

/// C record (transaction)
#[derive(Debug)]
pub struct TransactionLayout {
    pub record_length: FieldSpec,
    pub marker: FieldSpec,
    pub primary_bank: FieldSpec,
    pub target_bank: FieldSpec,
    pub target_account: FieldSpec,
    pub reference: FieldSpec,
    pub type_key: FieldSpec,
    pub type_extension: FieldSpec,
    pub amount_dm: FieldSpec,
    pub executive_bank: FieldSpec,
    pub executive_account: FieldSpec,
    pub amount: FieldSpec,
    pub target_name: FieldSpec,
    pub executive_name: FieldSpec,
    pub description: FieldSpec,
    pub currency: FieldSpec,
    pub extension_count: FieldSpec,
    pub constants: Constants,
    /// Value of the record length field for a record without extensions
    pub base_length: u64,
    /// Blocks occupied by a record with n extension parts
    pub block_count: [u64; MAX_EXTENSIONS + 1],
    /// Extension parts stored directly after the core fields
    pub inline_extensions: usize,
    /// Offset of the first inline extension part
    pub inline_extension_offset: usize,
    /// Offset of the first continuation block
    pub extension_area_offset: usize,
    /// Extension parts per continuation block
    pub extensions_per_block: usize,
}

/// E record (checksum)
#[derive(Debug)]
pub struct ChecksumLayout {
    pub record_length: FieldSpec,
    pub marker: FieldSpec,
    pub count: FieldSpec,
    pub sum_amount_dm: FieldSpec,
    pub sum_target_account: FieldSpec,
    pub sum_target_bank: FieldSpec,
    pub sum_amount: FieldSpec,
    pub constants: Constants,
}

/// Everything format specific
#[derive(Debug)]
pub struct FormatProfile {
    pub format: Format,
    pub block_size: u64,
    pub charset: Charset,
    pub header: HeaderLayout,
    pub transaction: TransactionLayout,
    pub checksum: ChecksumLayout,
}

impl FormatProfile {
    /// Blocks used by a transaction with `extensions` parts, `None` above 15.
    pub fn transaction_blocks(&self, extensions: usize) -> Option<u64> {
        self.transaction.block_count.get(extensions).copied()
    }

    /// Physical length of a transaction with `extensions` parts.
    pub fn transaction_length(&self, extensions: usize) -> Option<u64> {
        self.transaction_blocks(extensions)
            .map(|blocks| blocks * self.block_size)
    }

    /// Length of the smallest transaction record, enough to read C18.
    pub fn min_transaction_length(&self) -> u64 {
        self.transaction.block_count[0] * self.block_size
    }

    /// Value of the C1 record length field for `extensions` parts.
    pub fn transaction_record_length(&self, extensions: usize) -> u64 {
        self.transaction.base_length + (extensions * EXTENSION_LENGTH) as u64
    }

    /// Offset of extension part `index` relative to the record start. The
    /// type tag sits at this offset, the value right after it.
    pub fn extension_offset(&self, index: usize) -> usize {
        let layout = &self.transaction;
        if index < layout.inline_extensions {
            layout.inline_extension_offset + index * EXTENSION_LENGTH
        } else {
            let rest = index - layout.inline_extensions;
            layout.extension_area_offset
                + (rest / layout.extensions_per_block) * self.block_size as usize
                + (rest % layout.extensions_per_block) * EXTENSION_LENGTH
        }
    }

    /// Type tag and value fields of extension part `index`
    pub fn extension_fields(&self, index: usize) -> (FieldSpec, FieldSpec) {
        let offset = self.extension_offset(index);
        (
            FieldSpec::new(Field::C19, offset, EXTENSION_TYPE_LENGTH, Encoding::Digits),
            FieldSpec::new(
                Field::C20,
                offset + EXTENSION_TYPE_LENGTH,
                EXTENSION_VALUE_LENGTH,
                Encoding::Text,
            ),
        )
    }

    /// The record type marker as encoded in this format
    pub fn marker_byte(&self, marker: char) -> u8 {
        self.charset.encode(marker).unwrap_or(0)
    }
}
