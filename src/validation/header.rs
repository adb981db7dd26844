//! Built-in header validators

use super::{HeaderValidator, ValidationContext, ValidationErrors};
use crate::codec::{is_date_in_range, max_date, min_date};
use crate::engine::CurrencyCounter;
use crate::layout::Field;
use crate::types::Header;

/// Customer name set; sender bank present exactly for bank-submitted files.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredHeaderFields;

impl HeaderValidator for RequiredHeaderFields {
    fn assert_valid_header(
        &self,
        _ctx: &ValidationContext<'_>,
        header: &Header,
        _counter: &CurrencyCounter,
        mut errors: ValidationErrors,
    ) -> ValidationErrors {
        if header.customer.is_empty() {
            errors.add(Field::A6, "customer name is required");
        }
        match (header.file_type.is_send_by_bank(), header.bank_data) {
            (true, None) => errors.add(
                Field::A5,
                format!("sender bank is required for {} files", header.file_type),
            ),
            (false, Some(_)) => errors.add(
                Field::A5,
                format!("sender bank is not allowed for {} files", header.file_type),
            ),
            _ => {}
        }
        errors
    }
}

/// Dates in range, execution date within the allowed delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDateValidator;

impl HeaderValidator for HeaderDateValidator {
    fn assert_valid_header(
        &self,
        ctx: &ValidationContext<'_>,
        header: &Header,
        _counter: &CurrencyCounter,
        mut errors: ValidationErrors,
    ) -> ValidationErrors {
        let range = format!("outside {} .. {}", min_date(), max_date());
        if !is_date_in_range(header.create_date) {
            errors.add(Field::A7, format!("creation date {} {}", header.create_date, range));
        }

        let Some(execution) = header.execution_date else {
            return errors;
        };
        if !is_date_in_range(execution) {
            errors.add(Field::A11b, format!("execution date {} {}", execution, range));
        } else if execution < header.create_date {
            errors.add(
                Field::A11b,
                format!(
                    "execution date {} before creation date {}",
                    execution, header.create_date
                ),
            );
        } else if (execution - header.create_date).num_days() > ctx.config.max_execution_delay_days {
            errors.add(
                Field::A11b,
                format!(
                    "execution date {} more than {} days after creation date {}",
                    execution, ctx.config.max_execution_delay_days, header.create_date
                ),
            );
        }
        errors
    }
}

/// Header currency and every currency in use have a code at the creation
/// date.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderCurrencyValidator;

impl HeaderValidator for HeaderCurrencyValidator {
    fn assert_valid_header(
        &self,
        ctx: &ValidationContext<'_>,
        header: &Header,
        counter: &CurrencyCounter,
        mut errors: ValidationErrors,
    ) -> ValidationErrors {
        let date = header.create_date;
        if ctx.currencies.dtaus_code(&header.currency, date).is_none() {
            errors.add(
                Field::A12,
                format!("currency {} has no DTAUS code at {}", header.currency, date),
            );
        }
        for currency in counter.currencies() {
            if ctx.currencies.dtaus_code(&currency, date).is_none() {
                errors.add(
                    Field::A12,
                    format!("currency {} in use but invalid at {}", currency, date),
                );
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::config::DtausConfig;
    use crate::directory::{StaticCurrencyDirectory, StaticTextschluesselDirectory};
    use crate::types::{Bankleitzahl, Currency, LogicalFileType};
    use crate::validation::fixtures;

    fn check(validator: &dyn HeaderValidator, header: &Header, counter: &CurrencyCounter) -> ValidationErrors {
        let config = DtausConfig::default();
        let textschluessel = StaticTextschluesselDirectory::default();
        let currencies = StaticCurrencyDirectory::default();
        let ctx = ValidationContext {
            header: None,
            config: &config,
            textschluessel: &textschluessel,
            currencies: &currencies,
        };
        validator.assert_valid_header(&ctx, header, counter, ValidationErrors::new())
    }

    #[test]
    fn test_blank_customer() {
        let mut header = fixtures::header();
        header.customer = fixtures::text("");
        let errors = check(&RequiredHeaderFields, &header, &CurrencyCounter::default());
        assert!(errors.contains(Field::A6));
    }

    #[test]
    fn test_sender_bank_rules() {
        let mut header = fixtures::header();
        header.file_type = LogicalFileType::GB;
        let errors = check(&RequiredHeaderFields, &header, &CurrencyCounter::default());
        assert!(errors.contains(Field::A5));

        header.bank_data = Some(Bankleitzahl::new(30_000_000).unwrap());
        assert!(check(&RequiredHeaderFields, &header, &CurrencyCounter::default()).is_empty());

        header.file_type = LogicalFileType::GK;
        let errors = check(&RequiredHeaderFields, &header, &CurrencyCounter::default());
        assert!(errors.contains(Field::A5));
    }

    #[test]
    fn test_schedule_dates() {
        let mut header = fixtures::header();
        header.execution_date = NaiveDate::from_ymd_opt(2024, 2, 29);
        let errors = check(&HeaderDateValidator, &header, &CurrencyCounter::default());
        assert!(errors.get(Field::A11b).unwrap().contains("before"));

        header.execution_date = NaiveDate::from_ymd_opt(2024, 3, 16);
        assert!(check(&HeaderDateValidator, &header, &CurrencyCounter::default()).is_empty());

        header.execution_date = NaiveDate::from_ymd_opt(2024, 3, 17);
        let errors = check(&HeaderDateValidator, &header, &CurrencyCounter::default());
        assert!(errors.get(Field::A11b).unwrap().contains("15 days"));
    }

    #[test]
    fn test_creation_date_range() {
        let mut header = fixtures::header();
        header.create_date = NaiveDate::from_ymd_opt(1979, 12, 31).unwrap();
        header.execution_date = None;
        let errors = check(&HeaderDateValidator, &header, &CurrencyCounter::default());
        assert!(errors.contains(Field::A7));
    }

    #[test]
    fn test_currency_in_use_must_stay_valid() {
        let mut header = fixtures::header();
        let mut counter = CurrencyCounter::default();
        counter.add(Currency::DEM);
        let errors = check(&HeaderCurrencyValidator, &header, &counter);
        assert!(errors.get(Field::A12).unwrap().contains("DEM"));

        header.create_date = NaiveDate::from_ymd_opt(2001, 6, 1).unwrap();
        assert!(check(&HeaderCurrencyValidator, &header, &counter).is_empty());
    }

    #[test]
    fn test_header_currency_needs_code() {
        let mut header = fixtures::header();
        header.currency = Currency::new("USD").unwrap();
        let errors = check(&HeaderCurrencyValidator, &header, &CurrencyCounter::default());
        assert!(errors.contains(Field::A12));
    }
}
