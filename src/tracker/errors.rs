//! Error types for weight tracking operations
//!
//! Every failure a request can hit is one of four kinds: the input was
//! rejected before touching storage, the referenced entry does not exist,
//! the write collided with the one-entry-per-day constraint, or storage
//! itself misbehaved. The API layer maps each kind to its own status code.

use chrono::NaiveDate;
use thiserror::Error;

use crate::database::DatabaseError;

/// Input rejected before reaching storage
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was absent from the request body
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A date did not match the strict `YYYY-MM-DD` layout or is not a calendar date
    #[error("Invalid {field}: expected YYYY-MM-DD, got {value:?}")]
    InvalidDateFormat { field: &'static str, value: String },

    /// A measurement date lies after today (UTC)
    #[error("Invalid date: {0} is in the future")]
    FutureDate(NaiveDate),

    /// Weight was zero, negative, or not a finite number
    #[error("Invalid pounds: must be greater than zero, got {0}")]
    NonPositiveWeight(f64),

    /// Goal weight was present but zero, negative, or not a finite number
    #[error("Invalid goal pounds: must be greater than zero, got {0}")]
    NonPositiveGoal(f64),

    /// Path id was not an integer
    #[error("Invalid weight ID: {0}")]
    InvalidId(String),

    /// Request body was not JSON of the expected shape
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

impl ValidationError {
    /// Returns true if the rejected input was the measurement date
    pub fn is_date_error(&self) -> bool {
        matches!(
            self,
            ValidationError::InvalidDateFormat { .. }
                | ValidationError::FutureDate(_)
                | ValidationError::MissingField("date")
        )
    }
}

/// Errors surfaced by the weight and goal operations
///
/// # Error Categories
///
/// - **Validation**: `Validation`
/// - **State**: `WeightNotFound`, `DuplicateDate`
/// - **Internal**: `Storage`
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Weight entry not found: {0}")]
    WeightNotFound(i64),

    #[error("Weight entry already exists for {0}")]
    DuplicateDate(NaiveDate),

    #[error("Storage failure: {0}")]
    Storage(#[from] DatabaseError),
}

impl From<diesel::result::Error> for TrackerError {
    fn from(err: diesel::result::Error) -> Self {
        TrackerError::Storage(DatabaseError::from(err))
    }
}

impl TrackerError {
    /// Returns true if the request was rejected before reaching storage
    pub fn is_validation_error(&self) -> bool {
        matches!(self, TrackerError::Validation(_))
    }

    /// Returns true if the error describes stored state (missing entry or date clash)
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            TrackerError::WeightNotFound(_) | TrackerError::DuplicateDate(_)
        )
    }
}
