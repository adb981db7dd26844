//! Calendar date fields
//!
//! Two layouts exist: `DDMMYY` (short) and `DDMMYYYY` (long). Short years
//! pivot at 80: `00..=79` map to 2000-2079, `80..=99` to 1980-1999. Every
//! date must lie in 1980-01-01..=2079-12-31; an all-blank field means "no
//! date".

use chrono::{Datelike, NaiveDate};

use super::charset::Charset;
use super::errors::{CodecError, CodecResult};
use super::numeric::read_digits;
use super::text::is_blank;

/// Width of a short date field
pub const SHORT_DATE_WIDTH: usize = 6;
/// Width of a long date field
pub const LONG_DATE_WIDTH: usize = 8;

/// First representable date
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1980, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Last representable date
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2079, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Whether a date lies within the representable range
pub fn is_date_in_range(date: NaiveDate) -> bool {
    date >= min_date() && date <= max_date()
}

/// Reads a `DDMMYY` field.
pub fn read_short_date(bytes: &[u8], charset: Charset) -> CodecResult<Option<NaiveDate>> {
    read_date(bytes, SHORT_DATE_WIDTH, charset)
}

/// Reads a `DDMMYYYY` field.
pub fn read_long_date(bytes: &[u8], charset: Charset) -> CodecResult<Option<NaiveDate>> {
    read_date(bytes, LONG_DATE_WIDTH, charset)
}

fn read_date(bytes: &[u8], width: usize, charset: Charset) -> CodecResult<Option<NaiveDate>> {
    if bytes.len() != width {
        return Err(CodecError::UnsupportedWidth(bytes.len()));
    }
    if is_blank(bytes, charset) {
        return Ok(None);
    }

    let number = |range: std::ops::Range<usize>| -> CodecResult<u32> {
        read_digits(&bytes[range], charset, false)
            .map(|d| d.value as u32)
            .map_err(|_| CodecError::InvalidDate(format!("non-digit content {:02X?}", bytes)))
    };

    let day = number(0..2)?;
    let month = number(2..4)?;
    let year = if width == SHORT_DATE_WIDTH {
        let yy = number(4..6)?;
        if yy <= 79 {
            2000 + yy
        } else {
            1900 + yy
        }
    } else {
        number(4..8)?
    };

    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| {
        CodecError::InvalidDate(format!("{:02}.{:02}.{:04} is not a calendar date", day, month, year))
    })?;
    if !is_date_in_range(date) {
        return Err(CodecError::InvalidDate(format!("{} outside 1980-2079", date)));
    }
    Ok(Some(date))
}

/// Writes a `DDMMYY` field; `None` writes blanks.
pub fn write_short_date(date: Option<NaiveDate>, out: &mut [u8], charset: Charset) -> CodecResult<()> {
    write_date(date, out, SHORT_DATE_WIDTH, charset)
}

/// Writes a `DDMMYYYY` field; `None` writes blanks.
pub fn write_long_date(date: Option<NaiveDate>, out: &mut [u8], charset: Charset) -> CodecResult<()> {
    write_date(date, out, LONG_DATE_WIDTH, charset)
}

fn write_date(date: Option<NaiveDate>, out: &mut [u8], width: usize, charset: Charset) -> CodecResult<()> {
    if out.len() != width {
        return Err(CodecError::UnsupportedWidth(out.len()));
    }
    let date = match date {
        Some(date) => date,
        None => {
            out.fill(charset.space());
            return Ok(());
        }
    };
    if !is_date_in_range(date) {
        return Err(CodecError::InvalidDate(format!("{} outside 1980-2079", date)));
    }

    let year = date.year() as u32;
    let text = if width == SHORT_DATE_WIDTH {
        format!("{:02}{:02}{:02}", date.day(), date.month(), year % 100)
    } else {
        format!("{:02}{:02}{:04}", date.day(), date.month(), year)
    };
    for (slot, digit) in out.iter_mut().zip(text.bytes()) {
        *slot = charset.digit(digit - b'0');
    }
    Ok(())
}
