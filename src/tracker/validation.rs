//! Input validation for weight entries and the goal setting
//!
//! All checks run before any storage access. Dates are compared against
//! "today" as a UTC calendar day, passed in explicitly so callers and tests
//! control the clock.

use chrono::{NaiveDate, Utc};

use super::errors::ValidationError;

/// The only accepted date layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A weight measurement that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidWeight {
    pub date: NaiveDate,
    pub pounds: f64,
}

/// Current calendar day in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a strict `YYYY-MM-DD` date
///
/// chrono alone accepts unpadded fields and signed or longer years, so the
/// 4-2-2 digit shape is checked before parsing.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDateFormat {
        field,
        value: raw.to_string(),
    };

    let bytes = raw.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

/// Validate a measurement date: strict layout and not after `today`
pub fn validate_entry_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = parse_date("date", raw)?;
    if date > today {
        return Err(ValidationError::FutureDate(date));
    }
    Ok(date)
}

/// Validate that a weight is present and strictly positive
pub fn validate_pounds(pounds: Option<f64>) -> Result<f64, ValidationError> {
    match pounds {
        None => Err(ValidationError::MissingField("pounds")),
        Some(p) if p.is_finite() && p > 0.0 => Ok(p),
        Some(p) => Err(ValidationError::NonPositiveWeight(p)),
    }
}

/// Validate a goal weight; absence clears the goal and is always valid
pub fn validate_goal_pounds(pounds: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match pounds {
        Some(p) if !(p.is_finite() && p > 0.0) => Err(ValidationError::NonPositiveGoal(p)),
        other => Ok(other),
    }
}

/// Validate a full create/update payload
pub fn validate_weight(
    date: Option<&str>,
    pounds: Option<f64>,
    today: NaiveDate,
) -> Result<ValidWeight, ValidationError> {
    let raw_date = date.ok_or(ValidationError::MissingField("date"))?;
    let pounds = validate_pounds(pounds)?;
    let date = validate_entry_date(raw_date, today)?;
    Ok(ValidWeight { date, pounds })
}
