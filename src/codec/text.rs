//! Space-padded alphanumeric fields

use super::charset::Charset;
use super::errors::{CodecError, CodecResult};

/// Reads a space-padded alphanumeric field; trailing spaces are dropped.
pub fn read_alphanumeric(bytes: &[u8], charset: Charset) -> CodecResult<String> {
    let mut text = String::with_capacity(bytes.len());
    for (offset, &byte) in bytes.iter().enumerate() {
        let c = charset
            .decode(byte)
            .ok_or(CodecError::InvalidCharacter { offset, byte })?;
        text.push(c);
    }
    let trimmed = text.trim_end_matches(' ').len();
    text.truncate(trimmed);
    Ok(text)
}

/// Writes text left aligned, padding with spaces.
pub fn write_alphanumeric(text: &str, out: &mut [u8], charset: Charset) -> CodecResult<()> {
    let length = text.chars().count();
    if length > out.len() {
        return Err(CodecError::TextTooLong {
            length,
            width: out.len(),
        });
    }

    out.fill(charset.space());
    for (offset, (slot, c)) in out.iter_mut().zip(text.chars()).enumerate() {
        *slot = charset.encode(c).ok_or(CodecError::InvalidCharacter {
            offset,
            byte: u8::try_from(u32::from(c)).unwrap_or(b'?'),
        })?;
    }
    Ok(())
}

/// Whether every byte of the window is a space
pub fn is_blank(bytes: &[u8], charset: Charset) -> bool {
    bytes.iter().all(|&b| charset.is_space(b))
}
