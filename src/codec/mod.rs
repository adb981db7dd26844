//! Byte-field codec
//!
//! Pure conversions between fixed-width byte windows and domain values.
//! Nothing in here performs I/O or knows about record layouts; callers
//! slice the window out of a record buffer and hand it over.
//!
//! Every reader is strict: it either returns the decoded value or a
//! `CodecError` describing the first offending byte. Turning that into a
//! diagnostic or a corruption error is the engine's job.

mod charset;
mod date;
mod errors;
mod numeric;
mod text;

pub use charset::{is_dtaus_char, Charset};
pub use date::{
    is_date_in_range, max_date, min_date, read_long_date, read_short_date, write_long_date,
    write_short_date, LONG_DATE_WIDTH, SHORT_DATE_WIDTH,
};
pub use errors::{CodecError, CodecResult};
pub use numeric::{
    packed_capacity, pow10, read_binary, read_digits, read_packed, write_binary, write_digits,
    write_packed, write_signed_digits, Digits, MAX_DIGITS, PACKED_SIGN,
};
pub use text::{is_blank, read_alphanumeric, write_alphanumeric};
