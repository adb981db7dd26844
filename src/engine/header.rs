//! A record: header of a logical file

use crate::container::ByteContainer;
use crate::diagnostics::{Diagnostics, MessageKind};
use crate::errors::DtausResult;
use crate::observability::{log_event_with_fields, Event};
use crate::physical::PhysicalFile;
use crate::types::{Header, LogicalFileType, ReferenceNumber10};

use super::record::{RecordReader, RecordWriter};

impl<C: ByteContainer> PhysicalFile<C> {
    /// Decodes the A record of `file`.
    ///
    /// `Ok(None)` means the record was readable enough to continue but at
    /// least one field was reported to a lenient context.
    pub(crate) fn read_header(&mut self, diagnostics: &mut Diagnostics, file: usize) -> DtausResult<Option<Header>> {
        let profile = self.profile;
        let layout = &profile.header;
        let position = self.files[file].header_position;
        let bytes = self.read_record(diagnostics, Some(file), position, profile.block_size)?;
        let r = RecordReader::new(&bytes, position, Some(file), profile, &self.config);

        if r.character(&layout.marker) != Some('A') {
            return Err(r.fatal(
                diagnostics,
                MessageKind::InvalidRecordType,
                &layout.marker,
                "expected header record 'A'",
            ));
        }
        if let Some(length) = r.number(diagnostics, &layout.record_length)? {
            if length != profile.block_size {
                r.raise(
                    diagnostics,
                    MessageKind::IllegalRecordLength,
                    &layout.record_length,
                    format!("header record length {} instead of {}", length, profile.block_size),
                )?;
            }
        }

        let file_type = match r.text(diagnostics, &layout.file_type)? {
            Some(code) => match LogicalFileType::parse(&code) {
                Ok(file_type) => Some(file_type),
                Err(err) => {
                    r.raise(diagnostics, MessageKind::IllegalData, &layout.file_type, err.to_string())?;
                    None
                }
            },
            None => None,
        };
        let bank = r.bank(diagnostics, &layout.bank, true)?;
        let bank_data = r.bank(diagnostics, &layout.bank_data, false)?;
        let customer = r.required_alpha(diagnostics, &layout.customer, "customer name")?;
        let create_date = r.date(diagnostics, &layout.create_date)?;
        if create_date.is_none() && r.is_blank(&layout.create_date) {
            r.raise(
                diagnostics,
                MessageKind::MissingRequiredField,
                &layout.create_date,
                "create date is blank",
            )?;
        }
        let account = r.account(diagnostics, &layout.account)?;
        let reference = r.convert(
            diagnostics,
            &layout.reference,
            MessageKind::InvalidReferenceNumber,
            ReferenceNumber10::new,
        )?;
        let execution_date = r.date(diagnostics, &layout.execution_date)?;

        let currency = match (r.character(&layout.currency), create_date) {
            (Some(code), Some(date)) => match self.currencies.currency_for(code, date) {
                Some(currency) => Some(currency),
                None => {
                    r.raise(
                        diagnostics,
                        MessageKind::UnsupportedCurrency,
                        &layout.currency,
                        format!("no currency for code '{}' at {}", code, date),
                    )?;
                    None
                }
            },
            (None, _) => {
                r.raise(
                    diagnostics,
                    MessageKind::IllegalCharacters,
                    &layout.currency,
                    "currency code is not a DTAUS character",
                )?;
                None
            }
            (Some(_), None) => None,
        };

        let (
            Some(file_type),
            Some(bank),
            Some(customer),
            Some(account),
            Some(create_date),
            Some(currency),
            Some(reference),
        ) = (file_type, bank, customer, account, create_date, currency, reference)
        else {
            return Ok(None);
        };
        Ok(Some(Header {
            file_type,
            bank,
            bank_data,
            customer,
            account,
            create_date,
            execution_date,
            currency,
            reference,
        }))
    }

    pub(crate) fn encode_header(&self, header: &Header) -> DtausResult<Vec<u8>> {
        let profile = self.profile;
        let layout = &profile.header;
        let mut w = RecordWriter::new(profile.block_size as usize, profile.charset);
        w.constants(layout.constants);
        w.number(&layout.record_length, profile.block_size)?;
        w.character(&layout.marker, 'A')?;
        w.text(&layout.file_type, header.file_type.code())?;
        w.number(&layout.bank, header.bank.value())?;
        w.number(&layout.bank_data, header.bank_data.map_or(0, |b| b.value()))?;
        w.text(&layout.customer, header.customer.as_str())?;
        w.date(&layout.create_date, Some(header.create_date))?;
        w.number(&layout.account, header.account.value())?;
        w.number(&layout.reference, header.reference.value())?;
        w.date(&layout.execution_date, header.execution_date)?;
        let code = self.currency_code(&header.currency, header.create_date)?;
        w.character(&layout.currency, code)?;
        Ok(w.into_bytes())
    }

    /// Validates and writes a new header, returning the previous one.
    pub(crate) fn set_header(&mut self, file: usize, header: Header) -> DtausResult<Option<Header>> {
        self.validate_header(Some(file), &header)?;
        let bytes = self.encode_header(&header)?;
        let position = self.files[file].header_position;
        self.container.write_at(position, &bytes)?;
        let previous = self.files[file].header.replace(header);

        let file_str = file.to_string();
        let position_str = position.to_string();
        log_event_with_fields(
            Event::HeaderUpdated,
            &[("file", &file_str), ("position", &position_str)],
        );
        Ok(previous)
    }
}
