//! C record: transactions with their extension parts

use crate::container::ByteContainer;
use crate::diagnostics::{Diagnostics, MessageKind};
use crate::errors::{DtausError, DtausResult};
use crate::physical::PhysicalFile;
use crate::types::{
    AlphaNumericText27, ExtensionType, ReferenceNumber11, Textschluessel, Transaction,
    MAX_DESCRIPTIONS, MAX_EXTENSIONS,
};

use super::record::{RecordContext, RecordReader, RecordWriter};

/// One transaction as found on the container
#[derive(Debug, Clone)]
pub(crate) struct ScannedTransaction {
    /// Physical length in bytes
    pub length: u64,
    /// `None` when a field was reported to a lenient context or the
    /// logical file has no readable header
    pub transaction: Option<Transaction>,
    /// Raw values feeding the checksum, zero where unreadable
    pub amount: u64,
    pub target_account: u64,
    pub target_bank: u64,
}

impl<C: ByteContainer> PhysicalFile<C> {
    /// Reads the marker byte of the record at `position`.
    pub(crate) fn peek_marker(
        &mut self,
        diagnostics: &mut Diagnostics,
        file: usize,
        position: u64,
    ) -> DtausResult<Option<char>> {
        let bytes = self.read_record(diagnostics, Some(file), position, self.profile.block_size)?;
        let r = RecordReader::new(&bytes, position, Some(file), self.profile, &self.config);
        Ok(r.character(&self.profile.transaction.marker))
    }

    /// Reads and decodes the transaction at `position`.
    ///
    /// Marker, extension count and record extent are structural: problems
    /// there end the read in both policies.
    pub(crate) fn read_transaction_at(
        &mut self,
        diagnostics: &mut Diagnostics,
        file: usize,
        position: u64,
        context: Option<RecordContext>,
    ) -> DtausResult<ScannedTransaction> {
        let profile = self.profile;
        let layout = &profile.transaction;

        let head = self.read_record(diagnostics, Some(file), position, profile.min_transaction_length())?;
        let extensions = {
            let r = RecordReader::new(&head, position, Some(file), profile, &self.config);
            if r.character(&layout.marker) != Some('C') {
                return Err(r.fatal(
                    diagnostics,
                    MessageKind::InvalidRecordType,
                    &layout.marker,
                    "expected transaction record 'C'",
                ));
            }
            match r.decode_number(&layout.extension_count) {
                Ok(n) if n as usize <= MAX_EXTENSIONS => n as usize,
                Ok(n) => {
                    return Err(r.fatal(
                        diagnostics,
                        MessageKind::IllegalExtensionCount,
                        &layout.extension_count,
                        format!("{} extension parts, at most {} allowed", n, MAX_EXTENSIONS),
                    ))
                }
                Err(err) => {
                    return Err(r.fatal(
                        diagnostics,
                        MessageKind::IllegalExtensionCount,
                        &layout.extension_count,
                        err.to_string(),
                    ))
                }
            }
        };

        let length = profile
            .transaction_length(extensions)
            .unwrap_or_else(|| profile.min_transaction_length());
        let bytes = if length > head.len() as u64 {
            self.read_record(diagnostics, Some(file), position, length)?
        } else {
            head
        };
        let r = RecordReader::new(&bytes, position, Some(file), profile, &self.config);

        if let Some(value) = r.number(diagnostics, &layout.record_length)? {
            let expected = profile.transaction_record_length(extensions);
            if value != expected {
                r.raise(
                    diagnostics,
                    MessageKind::IllegalRecordLength,
                    &layout.record_length,
                    format!(
                        "record length {} does not match {} extension parts ({})",
                        value, extensions, expected
                    ),
                )?;
            }
        }

        let primary_bank = r.bank(diagnostics, &layout.primary_bank, false)?;
        let target_bank = r.bank(diagnostics, &layout.target_bank, true)?;
        let target_account = r.account(diagnostics, &layout.target_account)?;
        let reference = r.convert(
            diagnostics,
            &layout.reference,
            MessageKind::InvalidReferenceNumber,
            ReferenceNumber11::new,
        )?;
        let key = r.number(diagnostics, &layout.type_key)?;
        let key_extension = r.number(diagnostics, &layout.type_extension)?;
        let executive_bank = r.bank(diagnostics, &layout.executive_bank, true)?;
        let executive_account = r.account(diagnostics, &layout.executive_account)?;
        let amount = r.number(diagnostics, &layout.amount)?;
        let target_name = r.required_alpha(diagnostics, &layout.target_name, "target name")?;
        let executive_name = r.required_alpha(diagnostics, &layout.executive_name, "executive name")?;
        let first_description = r.alpha(diagnostics, &layout.description)?;
        let currency_code = r.character(&layout.currency);

        let mut complete = true;
        let mut target_ext = None;
        let mut executive_ext = None;
        let mut more_descriptions = Vec::new();
        for k in 0..extensions {
            let (tag_spec, value_spec) = profile.extension_fields(k);
            let tag = r.number(diagnostics, &tag_spec)?;
            let value = r.alpha(diagnostics, &value_spec)?;
            let kind = match tag {
                Some(tag) => match ExtensionType::from_code(tag) {
                    Some(kind) => Some(kind),
                    None => {
                        r.raise(
                            diagnostics,
                            MessageKind::IllegalExtensionType,
                            &tag_spec,
                            format!("unknown extension type {}", tag),
                        )?;
                        None
                    }
                },
                None => None,
            };
            match (kind, value) {
                (Some(ExtensionType::TargetName), Some(value)) if target_ext.is_none() => {
                    target_ext = Some(value)
                }
                (Some(ExtensionType::ExecutiveName), Some(value)) if executive_ext.is_none() => {
                    executive_ext = Some(value)
                }
                (Some(ExtensionType::Description), Some(value))
                    if more_descriptions.len() < MAX_DESCRIPTIONS - 1 =>
                {
                    more_descriptions.push(value)
                }
                (Some(kind), Some(_)) => {
                    r.raise(
                        diagnostics,
                        MessageKind::IllegalExtensionType,
                        &tag_spec,
                        format!("too many extension parts of type {}", kind.code()),
                    )?;
                    complete = false;
                }
                _ => complete = false,
            }
        }

        let mut descriptions = Vec::with_capacity(more_descriptions.len() + 1);
        match first_description {
            Some(first) if !first.is_empty() || !more_descriptions.is_empty() => descriptions.push(first),
            Some(_) => {}
            None => complete = false,
        }
        descriptions.extend(more_descriptions);

        let mut scanned = ScannedTransaction {
            length,
            transaction: None,
            amount: amount.unwrap_or(0),
            target_account: target_account.map_or(0, |a| a.value()),
            target_bank: target_bank.map_or(0, |b| b.value()),
        };

        // Type and currency only resolve against a readable header.
        let Some(context) = context else {
            return Ok(scanned);
        };
        let textschluessel = match (key, key_extension) {
            (Some(key), Some(extension)) => {
                self.resolve_textschluessel(diagnostics, &r, context, key, extension)?
            }
            _ => None,
        };
        let currency = match currency_code {
            Some(code) => match self.currencies.currency_for(code, context.create_date) {
                Some(currency) => Some(currency),
                None => {
                    r.raise(
                        diagnostics,
                        MessageKind::UnsupportedCurrency,
                        &layout.currency,
                        format!("no currency for code '{}' at {}", code, context.create_date),
                    )?;
                    None
                }
            },
            None => {
                r.raise(
                    diagnostics,
                    MessageKind::IllegalCharacters,
                    &layout.currency,
                    "currency code is not a DTAUS character",
                )?;
                None
            }
        };

        let (
            true,
            Some(textschluessel),
            Some(target_bank),
            Some(target_account),
            Some(executive_bank),
            Some(executive_account),
            Some(reference),
            Some(amount),
            Some(currency),
            Some(target_name),
            Some(executive_name),
        ) = (
            complete,
            textschluessel,
            target_bank,
            target_account,
            executive_bank,
            executive_account,
            reference,
            amount,
            currency,
            target_name,
            executive_name,
        )
        else {
            return Ok(scanned);
        };
        scanned.transaction = Some(Transaction {
            textschluessel,
            primary_bank,
            target_bank,
            target_account,
            executive_bank,
            executive_account,
            reference,
            amount,
            currency,
            target_name,
            target_ext,
            executive_name,
            executive_ext,
            descriptions,
        });
        Ok(scanned)
    }

    fn resolve_textschluessel(
        &self,
        diagnostics: &mut Diagnostics,
        r: &RecordReader<'_>,
        context: RecordContext,
        key: u64,
        extension: u64,
    ) -> DtausResult<Option<Textschluessel>> {
        let spec = &self.profile.transaction.type_key;
        let found = match (u8::try_from(key), u16::try_from(extension)) {
            (Ok(key), Ok(extension)) => self.textschluessel.lookup(key, extension, context.create_date),
            _ => None,
        };
        let Some(found) = found else {
            r.raise(
                diagnostics,
                MessageKind::InvalidTextschluessel,
                spec,
                format!("{:02}{:03} is not valid at {}", key, extension, context.create_date),
            )?;
            return Ok(None);
        };
        let allowed = (found.debit && context.file_type.is_debit_allowed())
            || (found.remittance && context.file_type.is_remittance_allowed());
        if !allowed {
            r.raise(
                diagnostics,
                MessageKind::InvalidTextschluessel,
                spec,
                format!("{} is not allowed in a {} file", found, context.file_type),
            )?;
            return Ok(None);
        }
        Ok(Some(found))
    }

    /// Encodes a transaction into a fresh C record.
    pub(crate) fn encode_transaction(
        &self,
        transaction: &Transaction,
        context: RecordContext,
    ) -> DtausResult<Vec<u8>> {
        let profile = self.profile;
        let layout = &profile.transaction;
        if transaction.descriptions.len() > MAX_DESCRIPTIONS {
            return Err(DtausError::IllegalArgument(format!(
                "{} description lines, at most {} allowed",
                transaction.descriptions.len(),
                MAX_DESCRIPTIONS
            )));
        }
        // A blank C16 without description extensions reads back as no description.
        if let [only] = transaction.descriptions.as_slice() {
            if only.is_empty() {
                return Err(DtausError::IllegalArgument(
                    "a single description line must not be blank".to_string(),
                ));
            }
        }
        let extensions = transaction.extensions();
        let length = profile.transaction_length(extensions.len()).ok_or_else(|| {
            DtausError::IllegalArgument(format!(
                "{} extension parts, at most {} allowed",
                extensions.len(),
                MAX_EXTENSIONS
            ))
        })?;

        let mut w = RecordWriter::new(length as usize, profile.charset);
        w.constants(layout.constants);
        w.number(&layout.record_length, profile.transaction_record_length(extensions.len()))?;
        w.character(&layout.marker, 'C')?;
        w.number(&layout.primary_bank, transaction.primary_bank.map_or(0, |b| b.value()))?;
        w.number(&layout.target_bank, transaction.target_bank.value())?;
        w.number(&layout.target_account, transaction.target_account.value())?;
        w.number(&layout.reference, transaction.reference.value())?;
        w.number(&layout.type_key, u64::from(transaction.textschluessel.key))?;
        w.number(&layout.type_extension, u64::from(transaction.textschluessel.extension))?;
        w.number(&layout.amount_dm, 0)?;
        w.number(&layout.executive_bank, transaction.executive_bank.value())?;
        w.number(&layout.executive_account, transaction.executive_account.value())?;
        w.number(&layout.amount, transaction.amount)?;
        w.text(&layout.target_name, transaction.target_name.as_str())?;
        w.text(&layout.executive_name, transaction.executive_name.as_str())?;
        w.text(
            &layout.description,
            transaction.descriptions.first().map_or("", AlphaNumericText27::as_str),
        )?;
        let code = self.currency_code(&transaction.currency, context.create_date)?;
        w.character(&layout.currency, code)?;
        w.number(&layout.extension_count, extensions.len() as u64)?;
        for (k, (kind, value)) in extensions.iter().enumerate() {
            let (tag_spec, value_spec) = profile.extension_fields(k);
            w.number(&tag_spec, kind.code())?;
            w.text(&value_spec, value.as_str())?;
        }
        Ok(w.into_bytes())
    }
}
