//! Field access on record buffers
//!
//! Records are read into a buffer in one piece and decoded field by field
//! through `RecordReader`, which turns codec failures into diagnostics at
//! the field's absolute position. `RecordWriter` builds fresh records:
//! blank-filled, format constants applied, then the fields.

use chrono::NaiveDate;

use crate::codec::{
    is_blank, read_alphanumeric, read_binary, read_digits, read_long_date, read_packed,
    read_short_date, write_alphanumeric, write_binary, write_digits, write_long_date,
    write_packed, write_short_date, Charset, CodecError, CodecResult,
};
use crate::config::DtausConfig;
use crate::container::ByteContainer;
use crate::diagnostics::{Diagnostics, Message, MessageKind};
use crate::errors::{DtausError, DtausResult};
use crate::layout::{Constants, Encoding, FieldSpec, FormatProfile};
use crate::observability::{log_event_with_fields, Event};
use crate::physical::PhysicalFile;
use crate::types::{
    AlphaNumericText27, Bankleitzahl, Header, Kontonummer, LogicalFileType, TypeResult,
};

/// What decoding a record needs to know about its logical file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordContext {
    pub create_date: NaiveDate,
    pub file_type: LogicalFileType,
}

impl RecordContext {
    pub fn of(header: &Header) -> Self {
        Self {
            create_date: header.create_date,
            file_type: header.file_type,
        }
    }
}

pub(crate) struct RecordReader<'a> {
    bytes: &'a [u8],
    position: u64,
    file: Option<usize>,
    charset: Charset,
    config: &'a DtausConfig,
}

impl<'a> RecordReader<'a> {
    pub fn new(
        bytes: &'a [u8],
        position: u64,
        file: Option<usize>,
        profile: &FormatProfile,
        config: &'a DtausConfig,
    ) -> Self {
        Self {
            bytes,
            position,
            file,
            charset: profile.charset,
            config,
        }
    }

    fn window(&self, spec: &FieldSpec) -> &'a [u8] {
        self.bytes.get(spec.range()).unwrap_or(&[])
    }

    /// The field's bytes for a diagnostic: hex for binary encodings,
    /// characters otherwise.
    fn raw(&self, spec: &FieldSpec) -> String {
        let window = self.window(spec);
        match spec.encoding {
            Encoding::Packed { .. } | Encoding::Binary => {
                window.iter().map(|b| format!("{:02X}", b)).collect()
            }
            _ => window
                .iter()
                .map(|&b| self.charset.decode(b).unwrap_or('?'))
                .collect(),
        }
    }

    fn message(&self, kind: MessageKind, spec: &FieldSpec, detail: impl Into<String>) -> Message {
        Message::new(kind, self.position + spec.offset as u64, detail)
            .with_field(spec.field)
            .with_raw(self.raw(spec))
    }

    pub fn raise(
        &self,
        diagnostics: &mut Diagnostics,
        kind: MessageKind,
        spec: &FieldSpec,
        detail: impl Into<String>,
    ) -> DtausResult<()> {
        diagnostics.raise(self.file, self.message(kind, spec, detail))
    }

    pub fn fatal(
        &self,
        diagnostics: &mut Diagnostics,
        kind: MessageKind,
        spec: &FieldSpec,
        detail: impl Into<String>,
    ) -> DtausError {
        diagnostics.fatal(self.file, self.message(kind, spec, detail))
    }

    pub fn is_blank(&self, spec: &FieldSpec) -> bool {
        is_blank(self.window(spec), self.charset)
    }

    /// Decodes a single character field.
    pub fn character(&self, spec: &FieldSpec) -> Option<char> {
        self.window(spec)
            .first()
            .and_then(|&b| self.charset.decode(b))
    }

    /// Decodes a numeric field without reporting.
    pub fn decode_number(&self, spec: &FieldSpec) -> CodecResult<u64> {
        let window = self.window(spec);
        match spec.encoding {
            Encoding::Digits => {
                let allow = self.config.allows_space_padding(spec.field);
                let digits = read_digits(window, self.charset, allow)?;
                if digits.corrected {
                    let position = (self.position + spec.offset as u64).to_string();
                    let field = format!("{:?}", spec.field);
                    let raw = self.raw(spec);
                    log_event_with_fields(
                        Event::ValueCorrected,
                        &[("field", &field), ("position", &position), ("raw", &raw)],
                    );
                }
                Ok(digits.value)
            }
            Encoding::Packed { signed } => read_packed(window, signed),
            Encoding::Binary => read_binary(window),
            _ => Err(CodecError::UnsupportedWidth(spec.length)),
        }
    }

    /// Numeric field; `None` after a lenient `IllegalData` report.
    pub fn number(&self, diagnostics: &mut Diagnostics, spec: &FieldSpec) -> DtausResult<Option<u64>> {
        match self.decode_number(spec) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.raise(diagnostics, MessageKind::IllegalData, spec, err.to_string())?;
                Ok(None)
            }
        }
    }

    /// Text field with trailing spaces trimmed.
    pub fn text(&self, diagnostics: &mut Diagnostics, spec: &FieldSpec) -> DtausResult<Option<String>> {
        match read_alphanumeric(self.window(spec), self.charset) {
            Ok(text) => Ok(Some(text)),
            Err(err) => {
                self.raise(diagnostics, MessageKind::IllegalCharacters, spec, err.to_string())?;
                Ok(None)
            }
        }
    }

    pub fn alpha(
        &self,
        diagnostics: &mut Diagnostics,
        spec: &FieldSpec,
    ) -> DtausResult<Option<AlphaNumericText27>> {
        let Some(text) = self.text(diagnostics, spec)? else {
            return Ok(None);
        };
        match AlphaNumericText27::parse(&text) {
            Ok(text) => Ok(Some(text)),
            Err(err) => {
                self.raise(diagnostics, MessageKind::IllegalCharacters, spec, err.to_string())?;
                Ok(None)
            }
        }
    }

    /// Text field that must not be blank.
    pub fn required_alpha(
        &self,
        diagnostics: &mut Diagnostics,
        spec: &FieldSpec,
        what: &str,
    ) -> DtausResult<Option<AlphaNumericText27>> {
        let text = self.alpha(diagnostics, spec)?;
        if matches!(text, Some(ref t) if t.is_empty()) {
            self.raise(
                diagnostics,
                MessageKind::MissingRequiredField,
                spec,
                format!("{} is blank", what),
            )?;
            return Ok(None);
        }
        Ok(text)
    }

    /// Date field; blank reads as `None` without a report.
    pub fn date(&self, diagnostics: &mut Diagnostics, spec: &FieldSpec) -> DtausResult<Option<NaiveDate>> {
        let window = self.window(spec);
        let result = match spec.encoding {
            Encoding::ShortDate => read_short_date(window, self.charset),
            Encoding::LongDate => read_long_date(window, self.charset),
            _ => Err(CodecError::UnsupportedWidth(spec.length)),
        };
        match result {
            Ok(date) => Ok(date),
            Err(err) => {
                self.raise(diagnostics, MessageKind::IllegalDate, spec, err.to_string())?;
                Ok(None)
            }
        }
    }

    /// Numeric field converted into a domain type.
    ///
    /// Zero in a required field reports `MissingRequiredField`; zero in an
    /// optional field reads as `None`.
    pub fn typed<T>(
        &self,
        diagnostics: &mut Diagnostics,
        spec: &FieldSpec,
        required: bool,
        kind: MessageKind,
        construct: impl FnOnce(u64) -> TypeResult<T>,
    ) -> DtausResult<Option<T>> {
        let Some(value) = self.number(diagnostics, spec)? else {
            return Ok(None);
        };
        if value == 0 && required {
            self.raise(diagnostics, MessageKind::MissingRequiredField, spec, "field is zero")?;
            return Ok(None);
        }
        if value == 0 {
            return Ok(None);
        }
        self.construct(diagnostics, spec, kind, value, construct)
    }

    /// Numeric field converted into a domain type, zero included.
    pub fn convert<T>(
        &self,
        diagnostics: &mut Diagnostics,
        spec: &FieldSpec,
        kind: MessageKind,
        construct: impl FnOnce(u64) -> TypeResult<T>,
    ) -> DtausResult<Option<T>> {
        match self.number(diagnostics, spec)? {
            Some(value) => self.construct(diagnostics, spec, kind, value, construct),
            None => Ok(None),
        }
    }

    fn construct<T>(
        &self,
        diagnostics: &mut Diagnostics,
        spec: &FieldSpec,
        kind: MessageKind,
        value: u64,
        construct: impl FnOnce(u64) -> TypeResult<T>,
    ) -> DtausResult<Option<T>> {
        match construct(value) {
            Ok(v) => Ok(Some(v)),
            Err(err) => {
                self.raise(diagnostics, kind, spec, err.to_string())?;
                Ok(None)
            }
        }
    }

    pub fn bank(
        &self,
        diagnostics: &mut Diagnostics,
        spec: &FieldSpec,
        required: bool,
    ) -> DtausResult<Option<Bankleitzahl>> {
        self.typed(diagnostics, spec, required, MessageKind::InvalidBankCode, Bankleitzahl::new)
    }

    pub fn account(&self, diagnostics: &mut Diagnostics, spec: &FieldSpec) -> DtausResult<Option<Kontonummer>> {
        self.typed(diagnostics, spec, true, MessageKind::InvalidAccountNumber, Kontonummer::new)
    }
}

pub(crate) struct RecordWriter {
    bytes: Vec<u8>,
    charset: Charset,
}

impl RecordWriter {
    /// A blank record of `length` bytes.
    pub fn new(length: usize, charset: Charset) -> Self {
        Self {
            bytes: vec![charset.space(); length],
            charset,
        }
    }

    pub fn constants(&mut self, constants: Constants) {
        for &(offset, value) in constants {
            self.bytes[offset..offset + value.len()].copy_from_slice(value);
        }
    }

    fn window(&mut self, spec: &FieldSpec) -> DtausResult<&mut [u8]> {
        let length = self.bytes.len();
        self.bytes.get_mut(spec.range()).ok_or_else(|| {
            DtausError::IllegalArgument(format!(
                "field {:?} outside record of {} bytes",
                spec.field, length
            ))
        })
    }

    pub fn number(&mut self, spec: &FieldSpec, value: u64) -> DtausResult<()> {
        let charset = self.charset;
        let encoding = spec.encoding;
        let out = self.window(spec)?;
        match encoding {
            Encoding::Digits => write_digits(value, out, charset)?,
            Encoding::Packed { signed } => write_packed(value, out, signed)?,
            Encoding::Binary => write_binary(value, out)?,
            _ => return Err(CodecError::UnsupportedWidth(out.len()).into()),
        }
        Ok(())
    }

    pub fn text(&mut self, spec: &FieldSpec, text: &str) -> DtausResult<()> {
        let charset = self.charset;
        write_alphanumeric(text, self.window(spec)?, charset)?;
        Ok(())
    }

    pub fn date(&mut self, spec: &FieldSpec, date: Option<NaiveDate>) -> DtausResult<()> {
        let charset = self.charset;
        let encoding = spec.encoding;
        let out = self.window(spec)?;
        match encoding {
            Encoding::ShortDate => write_short_date(date, out, charset)?,
            Encoding::LongDate => write_long_date(date, out, charset)?,
            _ => return Err(CodecError::UnsupportedWidth(out.len()).into()),
        }
        Ok(())
    }

    pub fn character(&mut self, spec: &FieldSpec, c: char) -> DtausResult<()> {
        let byte = self.charset.encode(c).ok_or_else(|| {
            DtausError::IllegalArgument(format!("character '{}' cannot be encoded", c))
        })?;
        let out = self.window(spec)?;
        out[0] = byte;
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl<C: ByteContainer> PhysicalFile<C> {
    /// Reads `length` bytes at `position`; a record running past the end of
    /// the container is a structural break.
    pub(crate) fn read_record(
        &mut self,
        diagnostics: &mut Diagnostics,
        file: Option<usize>,
        position: u64,
        length: u64,
    ) -> DtausResult<Vec<u8>> {
        let available = self.container.len();
        if position + length > available {
            let message = Message::new(
                MessageKind::TruncatedRecord,
                position,
                format!(
                    "record of {} bytes exceeds container length {}",
                    length, available
                ),
            );
            return Err(diagnostics.fatal(file, message));
        }
        let mut bytes = vec![0u8; length as usize];
        self.container.read_at(position, &mut bytes)?;
        Ok(bytes)
    }

    pub(crate) fn record_context(&self, file: usize) -> Option<RecordContext> {
        self.files[file].header.as_ref().map(RecordContext::of)
    }

    pub(crate) fn require_context(&self, file: usize) -> DtausResult<RecordContext> {
        self.record_context(file).ok_or_else(|| {
            DtausError::IllegalArgument(format!("logical file {} has no readable header", file))
        })
    }

    pub(crate) fn currency_code(
        &self,
        currency: &crate::types::Currency,
        date: NaiveDate,
    ) -> DtausResult<char> {
        self.currencies.dtaus_code(currency, date).ok_or_else(|| {
            DtausError::IllegalArgument(format!(
                "currency {} has no DTAUS code at {}",
                currency, date
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Field, DISK, TAPE};

    fn reader<'a>(bytes: &'a [u8], config: &'a DtausConfig, profile: &FormatProfile) -> RecordReader<'a> {
        RecordReader::new(bytes, 1000, Some(0), profile, config)
    }

    #[test]
    fn test_number_strict_and_lenient() {
        let config = DtausConfig::default();
        let bytes = b"0012X4".to_vec();
        let r = reader(&bytes, &config, &DISK);
        let good = FieldSpec::new(Field::A4, 0, 4, Encoding::Digits);
        let bad = FieldSpec::new(Field::A4, 2, 4, Encoding::Digits);

        let mut strict = Diagnostics::strict();
        assert_eq!(r.number(&mut strict, &good).unwrap(), Some(12));
        match r.number(&mut strict, &bad).unwrap_err() {
            DtausError::Corrupted { position, kind, .. } => {
                assert_eq!(position, 1002);
                assert_eq!(kind, MessageKind::IllegalData);
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut lenient = Diagnostics::lenient();
        assert_eq!(r.number(&mut lenient, &bad).unwrap(), None);
        let message = &lenient.messages()[0];
        assert_eq!(message.field, Some(Field::A4));
        assert_eq!(message.raw.as_deref(), Some("12X4"));
    }

    #[test]
    fn test_space_padding_is_configurable() {
        let bytes = b"  12".to_vec();
        let spec = FieldSpec::new(Field::A10, 0, 4, Encoding::Digits);

        let config = DtausConfig::default();
        let mut diagnostics = Diagnostics::lenient();
        assert_eq!(reader(&bytes, &config, &DISK).number(&mut diagnostics, &spec).unwrap(), None);

        let config = DtausConfig {
            space_padded_fields: vec![Field::A10],
            ..DtausConfig::default()
        };
        let mut diagnostics = Diagnostics::strict();
        assert_eq!(
            reader(&bytes, &config, &DISK).number(&mut diagnostics, &spec).unwrap(),
            Some(12)
        );
    }

    #[test]
    fn test_typed_zero_handling() {
        let config = DtausConfig::default();
        let bytes = b"00000000".to_vec();
        let r = reader(&bytes, &config, &DISK);
        let spec = FieldSpec::new(Field::C3, 0, 8, Encoding::Digits);

        let mut diagnostics = Diagnostics::lenient();
        assert_eq!(r.bank(&mut diagnostics, &spec, false).unwrap(), None);
        assert!(diagnostics.is_empty());

        assert_eq!(r.bank(&mut diagnostics, &spec, true).unwrap(), None);
        assert_eq!(diagnostics.count(MessageKind::MissingRequiredField), 1);
    }

    #[test]
    fn test_invalid_bank_code() {
        let config = DtausConfig::default();
        let bytes = b"90000000".to_vec();
        let r = reader(&bytes, &config, &DISK);
        let spec = FieldSpec::new(Field::C4, 0, 8, Encoding::Digits);
        let mut diagnostics = Diagnostics::lenient();
        assert_eq!(r.bank(&mut diagnostics, &spec, true).unwrap(), None);
        assert_eq!(diagnostics.count(MessageKind::InvalidBankCode), 1);
    }

    #[test]
    fn test_writer_blank_fill_and_constants() {
        let mut w = RecordWriter::new(8, TAPE.charset);
        w.constants(&[(2, &[0x00, 0x00])]);
        w.number(&FieldSpec::new(Field::C1, 0, 2, Encoding::Binary), 150).unwrap();
        w.character(&FieldSpec::new(Field::C2, 4, 1, Encoding::Text), 'C').unwrap();
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..4], &[0x00, 0x96, 0x00, 0x00]);
        assert_eq!(bytes[4], TAPE.charset.encode('C').unwrap());
        assert_eq!(&bytes[5..], &[0x40, 0x40, 0x40]);
    }

    #[test]
    fn test_writer_rejects_field_outside_record() {
        let mut w = RecordWriter::new(4, DISK.charset);
        let err = w
            .number(&FieldSpec::new(Field::E4, 2, 7, Encoding::Digits), 1)
            .unwrap_err();
        assert!(matches!(err, DtausError::IllegalArgument(_)));
    }
}
