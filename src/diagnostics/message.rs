//! Diagnostic messages

use std::fmt;

use serde::Serialize;

use crate::layout::Field;

/// What is wrong with a piece of data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    /// A mandatory field is blank or zero
    MissingRequiredField,
    /// A numeric field holds something other than a number
    IllegalData,
    /// A text field holds characters outside the DTAUS alphabet
    IllegalCharacters,
    /// A record carries an unexpected type marker
    InvalidRecordType,
    /// A date is malformed or outside 1980-2079
    IllegalDate,
    InvalidBankCode,
    InvalidAccountNumber,
    InvalidReferenceNumber,
    /// The transaction type is unknown or not allowed for the file type
    InvalidTextschluessel,
    /// Stored and recomputed checksum differ
    ChecksumMismatch,
    /// The container length is not a positive multiple of the block size
    IllegalFileLength,
    /// Execution date before the creation date or too far after it
    IllegalScheduleDates,
    /// No DTAUS currency code exists for a currency at a date
    UnsupportedCurrency,
    /// A record length field disagrees with the record's extension count
    IllegalRecordLength,
    /// An extension part carries an unknown type tag
    IllegalExtensionType,
    /// An extension count outside 0..=15
    IllegalExtensionCount,
    /// A record extends past the end of the container
    TruncatedRecord,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            MessageKind::IllegalData => "ILLEGAL_DATA",
            MessageKind::IllegalCharacters => "ILLEGAL_CHARACTERS",
            MessageKind::InvalidRecordType => "INVALID_RECORD_TYPE",
            MessageKind::IllegalDate => "ILLEGAL_DATE",
            MessageKind::InvalidBankCode => "INVALID_BANK_CODE",
            MessageKind::InvalidAccountNumber => "INVALID_ACCOUNT_NUMBER",
            MessageKind::InvalidReferenceNumber => "INVALID_REFERENCE_NUMBER",
            MessageKind::InvalidTextschluessel => "INVALID_TEXTSCHLUESSEL",
            MessageKind::ChecksumMismatch => "CHECKSUM_MISMATCH",
            MessageKind::IllegalFileLength => "ILLEGAL_FILE_LENGTH",
            MessageKind::IllegalScheduleDates => "ILLEGAL_SCHEDULE_DATES",
            MessageKind::UnsupportedCurrency => "UNSUPPORTED_CURRENCY",
            MessageKind::IllegalRecordLength => "ILLEGAL_RECORD_LENGTH",
            MessageKind::IllegalExtensionType => "ILLEGAL_EXTENSION_TYPE",
            MessageKind::IllegalExtensionCount => "ILLEGAL_EXTENSION_COUNT",
            MessageKind::TruncatedRecord => "TRUNCATED_RECORD",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One problem found while reading a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub kind: MessageKind,
    /// Offending field, when the problem is tied to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
    /// Absolute byte position in the container
    pub position: u64,
    /// Offending bytes as read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    pub detail: String,
}

impl Message {
    pub fn new(kind: MessageKind, position: u64, detail: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            position,
            raw: None,
            detail: detail.into(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] position {}", self.kind, self.position)?;
        if let Some(field) = self.field {
            write!(f, " field {:?}", field)?;
        }
        write!(f, ": {}", self.detail)?;
        if let Some(ref raw) = self.raw {
            write!(f, " (raw: '{}')", raw)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_display() {
        let message = Message::new(MessageKind::IllegalData, 135, "not a number")
            .with_field(Field::A4)
            .with_raw("1234567X");
        let display = message.to_string();
        assert!(display.contains("ILLEGAL_DATA"));
        assert!(display.contains("135"));
        assert!(display.contains("A4"));
        assert!(display.contains("1234567X"));
    }

    #[test]
    fn test_message_serializes_kind_as_code() {
        let message = Message::new(MessageKind::ChecksumMismatch, 256, "sums differ");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["kind"], "CHECKSUM_MISMATCH");
        assert_eq!(json["position"], 256);
        assert!(json.get("field").is_none());
    }
}
