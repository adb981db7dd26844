//! Built-in transaction validators

use super::{TransactionValidator, ValidationContext, ValidationErrors};
use crate::layout::Field;
use crate::types::Transaction;

/// Names set, amount non-zero and no blank description lines. Banks and
/// accounts are non-zero by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredTransactionFields;

impl TransactionValidator for RequiredTransactionFields {
    fn assert_valid_transaction(
        &self,
        _ctx: &ValidationContext<'_>,
        transaction: &Transaction,
        mut errors: ValidationErrors,
    ) -> ValidationErrors {
        if transaction.target_name.is_empty() {
            errors.add(Field::C14a, "target name is required");
        }
        if transaction.executive_name.is_empty() {
            errors.add(Field::C15, "executive name is required");
        }
        if transaction.amount == 0 {
            errors.add(Field::C12, "amount is required");
        }
        if let Some(line) = transaction.descriptions.iter().position(|d| d.is_empty()) {
            errors.add(Field::C16, format!("description line {} is blank", line + 1));
        }
        errors
    }
}

/// Amount within the configured bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountValidator;

impl TransactionValidator for AmountValidator {
    fn assert_valid_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        transaction: &Transaction,
        mut errors: ValidationErrors,
    ) -> ValidationErrors {
        let (min, max) = (ctx.config.min_amount, ctx.config.max_amount);
        if transaction.amount < min || transaction.amount > max {
            errors.add(
                Field::C12,
                format!("amount {} outside {} .. {}", transaction.amount, min, max),
            );
        }
        errors
    }
}

/// Description line count within the configured bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionCountValidator;

impl TransactionValidator for DescriptionCountValidator {
    fn assert_valid_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        transaction: &Transaction,
        mut errors: ValidationErrors,
    ) -> ValidationErrors {
        let count = transaction.descriptions.len();
        let (min, max) = (ctx.config.min_descriptions, ctx.config.max_descriptions);
        if count < min || count > max {
            errors.add(
                Field::C16,
                format!("{} description lines outside {} .. {}", count, min, max),
            );
        }
        errors
    }
}

/// Type known at the header's creation date and allowed by the file type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextschluesselValidator;

impl TransactionValidator for TextschluesselValidator {
    fn assert_valid_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        transaction: &Transaction,
        mut errors: ValidationErrors,
    ) -> ValidationErrors {
        let Some(header) = ctx.header else {
            return errors;
        };
        let requested = transaction.textschluessel;
        match ctx
            .textschluessel
            .lookup(requested.key, requested.extension, header.create_date)
        {
            None => errors.add(
                Field::C7a,
                format!("unknown transaction type {} at {}", requested, header.create_date),
            ),
            Some(known) => {
                let file_type = header.file_type;
                let allowed = (known.debit && file_type.is_debit_allowed())
                    || (known.remittance && file_type.is_remittance_allowed());
                if !allowed {
                    errors.add(
                        Field::C7a,
                        format!("transaction type {} not allowed in {} files", known, file_type),
                    );
                }
            }
        }
        errors
    }
}

/// Currency has a code at the header's creation date.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionCurrencyValidator;

impl TransactionValidator for TransactionCurrencyValidator {
    fn assert_valid_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        transaction: &Transaction,
        mut errors: ValidationErrors,
    ) -> ValidationErrors {
        let Some(header) = ctx.header else {
            return errors;
        };
        if ctx
            .currencies
            .dtaus_code(&transaction.currency, header.create_date)
            .is_none()
        {
            errors.add(
                Field::C17a,
                format!(
                    "currency {} has no DTAUS code at {}",
                    transaction.currency, header.create_date
                ),
            );
        }
        errors
    }
}
