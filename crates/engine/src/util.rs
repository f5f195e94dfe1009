//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::{DateTime, Utc};

use crate::{Currency, EngineError, Money, ResultEngine};

/// Salary must be expressed in minor units and never be negative.
pub(crate) fn validate_salary(salary_minor: i64) -> ResultEngine<Money> {
    if salary_minor < 0 {
        return Err(EngineError::InvalidAmount(format!(
            "salary must be non-negative, got: {salary_minor}"
        )));
    }
    Ok(Money::new(salary_minor))
}

/// Parse a currency code stored in the DB into a strongly typed `Currency`.
pub(crate) fn model_currency(value: &str, label: &str) -> ResultEngine<Currency> {
    Currency::try_from(value)
        .map_err(|_| EngineError::CurrencyMismatch(format!("invalid {label}: {value}")))
}

/// Convert stored epoch milliseconds into a UTC timestamp.
pub(crate) fn datetime_from_millis(millis: i64, label: &str) -> ResultEngine<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| EngineError::InvalidDate(format!("invalid {label}: {millis}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_currency_errors_keep_the_column() {
        assert_eq!(model_currency("egp", "currency").unwrap(), Currency::Egp);
        assert_eq!(
            model_currency("XYZ", "currency"),
            Err(EngineError::CurrencyMismatch(
                "invalid currency: XYZ".to_string()
            ))
        );
    }

    #[test]
    fn millis_out_of_range() {
        assert!(datetime_from_millis(0, "created_at").is_ok());
        assert_eq!(
            datetime_from_millis(i64::MAX, "created_at"),
            Err(EngineError::InvalidDate(format!(
                "invalid created_at: {}",
                i64::MAX
            )))
        );
    }
}
