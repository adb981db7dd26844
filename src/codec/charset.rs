//! Character sets used by the two physical encodings
//!
//! Disk files use DIN 66003 (ASCII with the German national variant:
//! `[ \ ] ~` carry `Ä Ö Ü ß`). Tape files use the EBCDIC code page 273
//! subset needed for the DTAUS alphabet.
//!
//! The DTAUS alphabet is: `A-Z`, `0-9`, space, `. , & - + * % / $` and
//! `Ä Ö Ü ß`. Anything else is illegal in an alphanumeric field.

use serde::{Deserialize, Serialize};

/// Byte encoding of characters and digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// DIN 66003, the German ASCII variant
    Ascii,
    /// EBCDIC code page 273
    Ebcdic,
}

impl Charset {
    /// The space character
    pub fn space(self) -> u8 {
        match self {
            Charset::Ascii => 0x20,
            Charset::Ebcdic => 0x40,
        }
    }

    /// Encodes a decimal digit 0..=9
    pub fn digit(self, digit: u8) -> u8 {
        debug_assert!(digit <= 9);
        match self {
            Charset::Ascii => b'0' + digit,
            Charset::Ebcdic => 0xF0 + digit,
        }
    }

    /// Decodes a digit byte, `None` for anything else
    pub fn to_digit(self, byte: u8) -> Option<u8> {
        let zero = self.digit(0);
        if (zero..=zero + 9).contains(&byte) {
            Some(byte - zero)
        } else {
            None
        }
    }

    /// Whether the byte is the space character
    pub fn is_space(self, byte: u8) -> bool {
        byte == self.space()
    }

    /// Encodes a character of the DTAUS alphabet
    pub fn encode(self, c: char) -> Option<u8> {
        match self {
            Charset::Ascii => encode_din66003(c),
            Charset::Ebcdic => encode_cp273(c),
        }
    }

    /// Decodes a byte into a character of the DTAUS alphabet
    pub fn decode(self, byte: u8) -> Option<char> {
        match self {
            Charset::Ascii => decode_din66003(byte),
            Charset::Ebcdic => decode_cp273(byte),
        }
    }
}

/// Whether a character belongs to the DTAUS alphabet
pub fn is_dtaus_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '0'..='9' | ' '
        | '.' | ',' | '&' | '-' | '+' | '*' | '%' | '/' | '$'
        | 'Ä' | 'Ö' | 'Ü' | 'ß')
}

fn encode_din66003(c: char) -> Option<u8> {
    match c {
        'Ä' => Some(0x5B),
        'Ö' => Some(0x5C),
        'Ü' => Some(0x5D),
        'ß' => Some(0x7E),
        c if is_dtaus_char(c) => Some(c as u8),
        _ => None,
    }
}

fn decode_din66003(byte: u8) -> Option<char> {
    match byte {
        0x5B => Some('Ä'),
        0x5C => Some('Ö'),
        0x5D => Some('Ü'),
        0x7E => Some('ß'),
        b if b.is_ascii() && is_dtaus_char(b as char) => Some(b as char),
        _ => None,
    }
}

fn encode_cp273(c: char) -> Option<u8> {
    let byte = match c {
        'A'..='I' => 0xC1 + (c as u8 - b'A'),
        'J'..='R' => 0xD1 + (c as u8 - b'J'),
        'S'..='Z' => 0xE2 + (c as u8 - b'S'),
        '0'..='9' => 0xF0 + (c as u8 - b'0'),
        ' ' => 0x40,
        '.' => 0x4B,
        ',' => 0x6B,
        '&' => 0x50,
        '-' => 0x60,
        '+' => 0x4E,
        '*' => 0x5C,
        '%' => 0x6C,
        '/' => 0x61,
        '$' => 0x5B,
        'Ä' => 0x4A,
        'Ö' => 0xE0,
        'Ü' => 0x5A,
        'ß' => 0xA1,
        _ => return None,
    };
    Some(byte)
}

fn decode_cp273(byte: u8) -> Option<char> {
    let c = match byte {
        0xC1..=0xC9 => (b'A' + (byte - 0xC1)) as char,
        0xD1..=0xD9 => (b'J' + (byte - 0xD1)) as char,
        0xE2..=0xE9 => (b'S' + (byte - 0xE2)) as char,
        0xF0..=0xF9 => (b'0' + (byte - 0xF0)) as char,
        0x40 => ' ',
        0x4B => '.',
        0x6B => ',',
        0x50 => '&',
        0x60 => '-',
        0x4E => '+',
        0x5C => '*',
        0x6C => '%',
        0x61 => '/',
        0x5B => '$',
        0x4A => 'Ä',
        0xE0 => 'Ö',
        0x5A => 'Ü',
        0xA1 => 'ß',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,&-+*%/$ÄÖÜß";

    #[test]
    fn test_every_alphabet_char_survives_both_charsets() {
        for charset in [Charset::Ascii, Charset::Ebcdic] {
            for c in ALPHABET.chars() {
                let byte = charset.encode(c).unwrap();
                assert_eq!(charset.decode(byte), Some(c), "{:?} {:?}", charset, c);
            }
        }
    }

    #[test]
    fn test_lowercase_is_not_encodable() {
        assert_eq!(Charset::Ascii.encode('a'), None);
        assert_eq!(Charset::Ebcdic.encode('z'), None);
        assert_eq!(Charset::Ascii.decode(b'a'), None);
    }

    #[test]
    fn test_umlauts_use_national_positions() {
        assert_eq!(Charset::Ascii.encode('Ä'), Some(b'['));
        assert_eq!(Charset::Ascii.decode(b'~'), Some('ß'));
        assert_eq!(Charset::Ebcdic.encode('Ü'), Some(0x5A));
    }

    #[test]
    fn test_digits() {
        assert_eq!(Charset::Ascii.to_digit(b'7'), Some(7));
        assert_eq!(Charset::Ebcdic.to_digit(0xF7), Some(7));
        assert_eq!(Charset::Ebcdic.to_digit(b'7'), None);
        assert_eq!(Charset::Ascii.to_digit(b' '), None);
    }

    #[test]
    fn test_markers() {
        assert_eq!(Charset::Ascii.encode('A'), Some(0x41));
        assert_eq!(Charset::Ebcdic.encode('C'), Some(0xC3));
        assert_eq!(Charset::Ebcdic.encode('E'), Some(0xC5));
    }
}
