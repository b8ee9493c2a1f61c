//! Parsing of loosely typed JSON inputs
//!
//! The dashboard submits amounts and pay periods either as JSON numbers or as
//! the raw text of a form field, so both are accepted here.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

use super::{DomainError, DomainResult};

/// Largest magnitude a `NUMERIC(12,2)` column holds: 9,999,999,999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Why an amount was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// Not a number
    Malformed,
    /// Magnitude above [`MAX_AMOUNT`]
    OutOfRange,
}

/// Parse a monetary amount, rounded to cents. `Ok(None)` for null or blank text.
pub fn parse_amount(value: &Value) -> Result<Option<Decimal>, AmountError> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(AmountError::Malformed),
    };

    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| AmountError::Malformed)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if amount.abs() > MAX_AMOUNT {
        return Err(AmountError::OutOfRange);
    }

    Ok(Some(amount))
}

fn amount_error(field: &str, err: AmountError) -> DomainError {
    match err {
        AmountError::Malformed => {
            DomainError::validation(format!("Invalid {} value provided.", field.to_lowercase()))
        }
        AmountError::OutOfRange => {
            DomainError::validation(format!("{} is out of range (maximum {})", field, MAX_AMOUNT))
        }
    }
}

/// A bonus: absent, null or blank means zero
pub fn parse_bonus(value: Option<&Value>) -> DomainResult<Decimal> {
    match value {
        None => Ok(Decimal::ZERO),
        Some(value) => parse_amount(value)
            .map(|amount| amount.unwrap_or(Decimal::ZERO))
            .map_err(|err| amount_error("Bonus", err)),
    }
}

/// A base salary for an employee profile
pub fn parse_salary(value: &Value) -> DomainResult<Option<Decimal>> {
    parse_amount(value).map_err(|err| amount_error("Salary", err))
}

/// `base + bonus`, refused when it would not fit a stored amount
pub fn checked_total(base: Decimal, bonus: Decimal) -> DomainResult<Decimal> {
    base.checked_add(bonus)
        .filter(|total| total.abs() <= MAX_AMOUNT)
        .ok_or_else(|| {
            DomainError::validation(format!("Total amount is out of range (maximum {})", MAX_AMOUNT))
        })
}

fn parse_whole(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Month of a pay period, 1 through 12
pub fn parse_month(value: Option<&Value>) -> DomainResult<i32> {
    let month = value
        .and_then(parse_whole)
        .ok_or_else(|| DomainError::validation("Month is required"))?;

    if !(1..=12).contains(&month) {
        return Err(DomainError::validation("Month must be between 1 and 12"));
    }

    Ok(month as i32)
}

/// Year of a pay period
pub fn parse_year(value: Option<&Value>) -> DomainResult<i32> {
    let year = value
        .and_then(parse_whole)
        .ok_or_else(|| DomainError::validation("Year is required"))?;

    if !(1..=i64::from(i32::MAX)).contains(&year) {
        return Err(DomainError::validation("Year must be a positive number"));
    }

    Ok(year as i32)
}

/// Trim free text, mapping blank to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amounts_accept_numbers_and_numeric_text() {
        assert_eq!(parse_amount(&json!(250)), Ok(Some(Decimal::new(250, 0))));
        assert_eq!(parse_amount(&json!("250.5")), Ok(Some(Decimal::new(2505, 1))));
        assert_eq!(parse_amount(&json!(" 12.345 ")), Ok(Some(Decimal::new(1235, 2))));
        assert_eq!(parse_amount(&json!("")), Ok(None));
        assert_eq!(parse_amount(&json!(null)), Ok(None));
        assert_eq!(parse_amount(&json!("abc")), Err(AmountError::Malformed));
        assert_eq!(parse_amount(&json!(true)), Err(AmountError::Malformed));
    }

    #[test]
    fn max_amount_matches_column_precision() {
        assert_eq!(MAX_AMOUNT, Decimal::from_str("9999999999.99").unwrap());
        assert_eq!(MAX_AMOUNT.to_string(), "9999999999.99");
    }

    #[test]
    fn amounts_beyond_column_precision_are_out_of_range() {
        assert_eq!(parse_amount(&json!("9999999999.99")), Ok(Some(MAX_AMOUNT)));
        assert_eq!(parse_amount(&json!("-9999999999.99")), Ok(Some(-MAX_AMOUNT)));
        assert_eq!(parse_amount(&json!("10000000000")), Err(AmountError::OutOfRange));
        assert_eq!(parse_amount(&json!(1e15)), Err(AmountError::OutOfRange));
        assert_eq!(
            parse_amount(&json!("79228162514264337593543950335")),
            Err(AmountError::OutOfRange)
        );
    }

    #[test]
    fn missing_bonus_is_zero_and_garbage_is_rejected() {
        assert_eq!(parse_bonus(None).unwrap(), Decimal::ZERO);
        assert_eq!(parse_bonus(Some(&json!(""))).unwrap(), Decimal::ZERO);
        assert_eq!(parse_bonus(Some(&json!("300"))).unwrap(), Decimal::new(300, 0));
        match parse_bonus(Some(&json!("lots"))) {
            Err(DomainError::Validation(message)) => {
                assert_eq!(message, "Invalid bonus value provided.")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(matches!(
            parse_bonus(Some(&json!("79228162514264337593543950335"))),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn oversized_salary_is_rejected() {
        match parse_salary(&json!(1e15)) {
            Err(DomainError::Validation(message)) => {
                assert_eq!(message, "Salary is out of range (maximum 9999999999.99)")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn totals_must_fit_a_stored_amount() {
        assert_eq!(
            checked_total(Decimal::new(5000, 0), Decimal::new(250, 0)).unwrap(),
            Decimal::new(5250, 0)
        );
        assert_eq!(checked_total(MAX_AMOUNT, -MAX_AMOUNT).unwrap(), Decimal::ZERO);
        assert!(checked_total(MAX_AMOUNT, Decimal::new(1, 2)).is_err());
        assert!(checked_total(Decimal::MAX, Decimal::MAX).is_err());
    }

    #[test]
    fn month_must_be_in_calendar_range() {
        assert_eq!(parse_month(Some(&json!(6))).unwrap(), 6);
        assert_eq!(parse_month(Some(&json!("12"))).unwrap(), 12);
        assert!(parse_month(Some(&json!(0))).is_err());
        assert!(parse_month(Some(&json!(13))).is_err());
        assert!(parse_month(Some(&json!(6.5))).is_err());
        assert!(parse_month(None).is_err());
    }

    #[test]
    fn year_must_be_positive() {
        assert_eq!(parse_year(Some(&json!(2024))).unwrap(), 2024);
        assert_eq!(parse_year(Some(&json!("2024"))).unwrap(), 2024);
        assert!(parse_year(Some(&json!(0))).is_err());
        assert!(parse_year(Some(&json!("last year"))).is_err());
    }

    #[test]
    fn blank_text_is_dropped() {
        assert_eq!(non_blank(Some("  Ops ".to_string())), Some("Ops".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
