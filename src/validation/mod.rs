//! Validation hooks
//!
//! Every header and transaction passes a validator chain before it is
//! written. Validators only add field-keyed messages to an accumulator;
//! the chain as a whole is all-or-nothing: one message rejects the
//! candidate and nothing in the container changes.
//!
//! Chains run in reverse registration order. Combined with "first message
//! per field wins" this means a validator registered later overrides the
//! message of an earlier one for the same field.

mod errors;
mod header;
mod transaction;

use crate::config::DtausConfig;
use crate::directory::{CurrencyDirectory, TextschluesselDirectory};
use crate::engine::CurrencyCounter;
use crate::types::{Header, Transaction};

pub use errors::ValidationErrors;
pub use header::{HeaderCurrencyValidator, HeaderDateValidator, RequiredHeaderFields};
pub use transaction::{
    AmountValidator, DescriptionCountValidator, RequiredTransactionFields,
    TextschluesselValidator, TransactionCurrencyValidator,
};

/// What a validator may consult besides the candidate.
pub struct ValidationContext<'a> {
    /// Current header of the logical file, `None` for a new file or an
    /// unreadable header
    pub header: Option<&'a Header>,
    pub config: &'a DtausConfig,
    pub textschluessel: &'a dyn TextschluesselDirectory,
    pub currencies: &'a dyn CurrencyDirectory,
}

pub trait HeaderValidator {
    /// Adds a message for every problem with `header`. `counter` holds the
    /// currencies used by the logical file's transactions.
    fn assert_valid_header(
        &self,
        ctx: &ValidationContext<'_>,
        header: &Header,
        counter: &CurrencyCounter,
        errors: ValidationErrors,
    ) -> ValidationErrors;
}

pub trait TransactionValidator {
    fn assert_valid_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        transaction: &Transaction,
        errors: ValidationErrors,
    ) -> ValidationErrors;
}

/// Registered validator chains
pub struct Validators {
    header: Vec<Box<dyn HeaderValidator>>,
    transaction: Vec<Box<dyn TransactionValidator>>,
}

impl Validators {
    /// No validators at all.
    pub fn empty() -> Self {
        Self {
            header: Vec::new(),
            transaction: Vec::new(),
        }
    }

    pub fn register_header(&mut self, validator: Box<dyn HeaderValidator>) {
        self.header.push(validator);
    }

    pub fn register_transaction(&mut self, validator: Box<dyn TransactionValidator>) {
        self.transaction.push(validator);
    }

    pub fn validate_header(
        &self,
        ctx: &ValidationContext<'_>,
        header: &Header,
        counter: &CurrencyCounter,
    ) -> Result<(), ValidationErrors> {
        self.header
            .iter()
            .rev()
            .fold(ValidationErrors::new(), |errors, validator| {
                validator.assert_valid_header(ctx, header, counter, errors)
            })
            .into_result()
    }

    pub fn validate_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        transaction: &Transaction,
    ) -> Result<(), ValidationErrors> {
        self.transaction
            .iter()
            .rev()
            .fold(ValidationErrors::new(), |errors, validator| {
                validator.assert_valid_transaction(ctx, transaction, errors)
            })
            .into_result()
    }
}

impl Default for Validators {
    /// The built-in checks.
    fn default() -> Self {
        let mut validators = Self::empty();
        validators.register_header(Box::new(RequiredHeaderFields));
        validators.register_header(Box::new(HeaderDateValidator));
        validators.register_header(Box::new(HeaderCurrencyValidator));
        validators.register_transaction(Box::new(RequiredTransactionFields));
        validators.register_transaction(Box::new(AmountValidator));
        validators.register_transaction(Box::new(DescriptionCountValidator));
        validators.register_transaction(Box::new(TextschluesselValidator));
        validators.register_transaction(Box::new(TransactionCurrencyValidator));
        validators
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::types::{
        AlphaNumericText27, Bankleitzahl, Currency, Header, Kontonummer, LogicalFileType,
        ReferenceNumber10, ReferenceNumber11, Textschluessel, Transaction,
    };

    pub fn text(s: &str) -> AlphaNumericText27 {
        AlphaNumericText27::parse(s).unwrap()
    }

    pub fn header() -> Header {
        Header {
            file_type: LogicalFileType::GK,
            bank: Bankleitzahl::new(10_000_000).unwrap(),
            bank_data: None,
            customer: text("ACME GMBH"),
            account: Kontonummer::new(1_234_567).unwrap(),
            create_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            execution_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            currency: Currency::EUR,
            reference: ReferenceNumber10::default(),
        }
    }

    pub fn transaction() -> Transaction {
        Transaction {
            textschluessel: Textschluessel::new(51, 0).unwrap(),
            primary_bank: None,
            target_bank: Bankleitzahl::new(10_000_000).unwrap(),
            target_account: Kontonummer::new(12_345_678).unwrap(),
            executive_bank: Bankleitzahl::new(20_000_000).unwrap(),
            executive_account: Kontonummer::new(1_234_567).unwrap(),
            reference: ReferenceNumber11::default(),
            amount: 1000,
            currency: Currency::EUR,
            target_name: text("MAX MUSTERMANN"),
            target_ext: None,
            executive_name: text("ACME GMBH"),
            executive_ext: None,
            descriptions: vec![text("RECHNUNG 4711")],
        }
    }
}
