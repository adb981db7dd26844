//! Alphanumeric text restricted to the DTAUS alphabet

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{TypeError, TypeResult};
use crate::codec::is_dtaus_char;

/// Text of at most 27 characters from the DTAUS alphabet, without
/// trailing spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlphaNumericText27(String);

impl AlphaNumericText27 {
    pub const MAX_LENGTH: usize = 27;

    /// Parses text exactly as given.
    pub fn parse(text: &str) -> TypeResult<Self> {
        let text = text.trim_end_matches(' ');
        if text.chars().count() > Self::MAX_LENGTH {
            return Err(TypeError::InvalidText {
                text: text.to_string(),
                reason: format!("longer than {} characters", Self::MAX_LENGTH),
            });
        }
        if let Some(c) = text.chars().find(|&c| !is_dtaus_char(c)) {
            return Err(TypeError::InvalidText {
                text: text.to_string(),
                reason: format!("illegal character '{}'", c),
            });
        }
        Ok(Self(text.to_string()))
    }

    /// Uppercases and folds lowercase umlauts before parsing.
    pub fn normalize(text: &str) -> TypeResult<Self> {
        let folded: String = text
            .chars()
            .map(|c| match c {
                'ä' => 'Ä',
                'ö' => 'Ö',
                'ü' => 'Ü',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        Self::parse(&folded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl TryFrom<String> for AlphaNumericText27 {
    type Error = TypeError;

    fn try_from(text: String) -> TypeResult<Self> {
        Self::parse(&text)
    }
}

impl From<AlphaNumericText27> for String {
    fn from(text: AlphaNumericText27) -> String {
        text.0
    }
}

impl fmt::Display for AlphaNumericText27 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let text = AlphaNumericText27::parse("RECHNUNG 4711/2024").unwrap();
        assert_eq!(text.as_str(), "RECHNUNG 4711/2024");
    }

    #[test]
    fn test_parse_trims_trailing_spaces() {
        assert_eq!(AlphaNumericText27::parse("ABC   ").unwrap().as_str(), "ABC");
    }

    #[test]
    fn test_parse_rejects_lowercase_and_length() {
        assert!(AlphaNumericText27::parse("abc").is_err());
        assert!(AlphaNumericText27::parse(&"X".repeat(28)).is_err());
        assert!(AlphaNumericText27::parse("A#B").is_err());
    }

    #[test]
    fn test_normalize() {
        let text = AlphaNumericText27::normalize("Müller Gmbh").unwrap();
        assert_eq!(text.as_str(), "MÜLLER GMBH");
    }

    #[test]
    fn test_empty() {
        assert!(AlphaNumericText27::default().is_empty());
        assert!(AlphaNumericText27::parse("   ").unwrap().is_empty());
    }
}
