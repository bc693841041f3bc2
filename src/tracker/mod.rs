//! Weight tracking rules: the error taxonomy and input validation

pub mod errors;
pub mod validation;

pub use errors::{TrackerError, ValidationError};
pub use validation::{
    parse_date, today_utc, validate_entry_date, validate_goal_pounds, validate_pounds,
    validate_weight, ValidWeight,
};
