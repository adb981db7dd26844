//! Numeric field encodings
//!
//! Three encodings exist:
//! - zoned digits, one character per digit (ASCII or EBCDIC)
//! - packed BCD, two digits per byte, with an optional trailing sign nibble
//! - unsigned big-endian binary integers of 1..=8 bytes
//!
//! Writers encode into a caller-provided window; the window length is the
//! field width.

use super::charset::Charset;
use super::errors::{CodecError, CodecResult};

/// Widest digit field that still fits a u64 accumulator
pub const MAX_DIGITS: usize = 18;

/// Sign nibble required on signed packed fields
pub const PACKED_SIGN: u8 = 0xC;

/// Result of reading a digit field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digits {
    /// Decoded value
    pub value: u64,
    /// Whether space padding was substituted with zero digits
    pub corrected: bool,
}

/// 10^exp as u64
pub fn pow10(exp: usize) -> u64 {
    10u64.pow(exp as u32)
}

/// Reads a zoned digit field.
///
/// With `allow_space_padding`, spaces read as `0` and the result is flagged
/// as corrected.
pub fn read_digits(bytes: &[u8], charset: Charset, allow_space_padding: bool) -> CodecResult<Digits> {
    if bytes.is_empty() || bytes.len() > MAX_DIGITS {
        return Err(CodecError::UnsupportedWidth(bytes.len()));
    }

    let mut value = 0u64;
    let mut corrected = false;
    for (offset, &byte) in bytes.iter().enumerate() {
        let digit = match charset.to_digit(byte) {
            Some(d) => d,
            None if allow_space_padding && charset.is_space(byte) => {
                corrected = true;
                0
            }
            None => return Err(CodecError::NotANumber { offset, byte }),
        };
        value = value * 10 + u64::from(digit);
    }

    Ok(Digits { value, corrected })
}

/// Writes a zoned digit field, left padded with zeros.
pub fn write_digits(value: u64, out: &mut [u8], charset: Charset) -> CodecResult<()> {
    let width = out.len();
    if width == 0 || width > MAX_DIGITS {
        return Err(CodecError::UnsupportedWidth(width));
    }
    if value > pow10(width) - 1 {
        return Err(CodecError::ValueOutOfRange {
            value: i128::from(value),
            width,
            unit: "digits",
        });
    }

    let mut rest = value;
    for slot in out.iter_mut().rev() {
        *slot = charset.digit((rest % 10) as u8);
        rest /= 10;
    }
    Ok(())
}

/// Writes a signed value as a zoned digit field; negative values are rejected.
pub fn write_signed_digits(value: i64, out: &mut [u8], charset: Charset) -> CodecResult<()> {
    if value < 0 {
        return Err(CodecError::ValueOutOfRange {
            value: i128::from(value),
            width: out.len(),
            unit: "digits",
        });
    }
    write_digits(value as u64, out, charset)
}

/// Number of digits a packed field of `width` bytes holds
pub fn packed_capacity(width: usize, signed: bool) -> usize {
    if signed {
        width * 2 - 1
    } else {
        width * 2
    }
}

/// Reads a packed BCD field.
///
/// When `signed`, the low nibble of the last byte is the sign and must be
/// `0xC`.
pub fn read_packed(bytes: &[u8], signed: bool) -> CodecResult<u64> {
    if bytes.is_empty() || packed_capacity(bytes.len(), signed) > MAX_DIGITS {
        return Err(CodecError::UnsupportedWidth(bytes.len()));
    }

    let last = bytes.len() - 1;
    let mut value = 0u64;
    for (offset, &byte) in bytes.iter().enumerate() {
        let high = byte >> 4;
        let low = byte & 0x0F;

        if high > 9 {
            return Err(CodecError::InvalidNibble { offset, nibble: high });
        }
        value = value * 10 + u64::from(high);

        if signed && offset == last {
            if low != PACKED_SIGN {
                return Err(CodecError::InvalidNibble { offset, nibble: low });
            }
        } else {
            if low > 9 {
                return Err(CodecError::InvalidNibble { offset, nibble: low });
            }
            value = value * 10 + u64::from(low);
        }
    }

    Ok(value)
}

/// Writes a packed BCD field.
pub fn write_packed(value: u64, out: &mut [u8], signed: bool) -> CodecResult<()> {
    let width = out.len();
    if width == 0 || packed_capacity(width, signed) > MAX_DIGITS {
        return Err(CodecError::UnsupportedWidth(width));
    }
    let digits = packed_capacity(width, signed);
    if value > pow10(digits) - 1 {
        return Err(CodecError::ValueOutOfRange {
            value: i128::from(value),
            width: digits,
            unit: "packed digits",
        });
    }

    // Nibbles from least significant to most significant.
    let mut rest = value;
    let mut nibbles = Vec::with_capacity(width * 2);
    if signed {
        nibbles.push(PACKED_SIGN);
    }
    while nibbles.len() < width * 2 {
        nibbles.push((rest % 10) as u8);
        rest /= 10;
    }

    for (i, slot) in out.iter_mut().rev().enumerate() {
        *slot = (nibbles[i * 2 + 1] << 4) | nibbles[i * 2];
    }
    Ok(())
}

/// Reads an unsigned big-endian integer of 1..=8 bytes.
pub fn read_binary(bytes: &[u8]) -> CodecResult<u64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(CodecError::UnsupportedWidth(bytes.len()));
    }
    Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

/// Writes an unsigned big-endian integer of 1..=8 bytes.
pub fn write_binary(value: u64, out: &mut [u8]) -> CodecResult<()> {
    let width = out.len();
    if width == 0 || width > 8 {
        return Err(CodecError::UnsupportedWidth(width));
    }
    if width < 8 && value >> (width * 8) != 0 {
        return Err(CodecError::ValueOutOfRange {
            value: i128::from(value),
            width,
            unit: "bytes",
        });
    }

    let be = value.to_be_bytes();
    out.copy_from_slice(&be[8 - width..]);
    Ok(())
}
