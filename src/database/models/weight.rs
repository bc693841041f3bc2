use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

/// Weight entry - one dated body-weight measurement
///
/// `date` is unique across the table; timestamps are UTC.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::database::schema::weights)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WeightEntry {
    /// Storage-assigned identifier
    pub id: i64,

    /// Calendar day of the measurement
    pub date: NaiveDate,

    /// Weight in pounds, always positive
    pub pounds: f64,

    /// Timestamp when record was created
    pub created_at: NaiveDateTime,

    /// Timestamp when record was last updated
    pub updated_at: NaiveDateTime,
}

/// New weight entry for insertion
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::database::schema::weights)]
pub struct NewWeightEntry {
    pub date: NaiveDate,
    pub pounds: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewWeightEntry {
    /// Stamp both timestamps with the same instant
    pub fn new(date: NaiveDate, pounds: f64, now: NaiveDateTime) -> Self {
        Self {
            date,
            pounds,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Column changes applied by an update; `created_at` is never touched
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::database::schema::weights)]
pub struct WeightChanges {
    pub date: NaiveDate,
    pub pounds: f64,
    pub updated_at: NaiveDateTime,
}

/// Optional inclusive bounds for listing entries
///
/// Bounds are kept as the caller's text and compared with the stored
/// `YYYY-MM-DD` column as strings, so a partial bound such as `2026-01`
/// still filters instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRangeFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeFilter {
    /// Build a filter from raw query values; empty strings mean "no bound"
    pub fn from_bounds(start_date: Option<String>, end_date: Option<String>) -> Self {
        let bound = |raw: Option<String>| raw.filter(|s| !s.is_empty());
        Self {
            start_date: bound(start_date),
            end_date: bound(end_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds_are_unbounded() {
        assert_eq!(
            DateRangeFilter::from_bounds(Some(String::new()), None),
            DateRangeFilter::default()
        );

        let filter = DateRangeFilter::from_bounds(Some("2026-01".into()), Some("2026-01-20".into()));
        assert_eq!(filter.start_date.as_deref(), Some("2026-01"));
        assert_eq!(filter.end_date.as_deref(), Some("2026-01-20"));
    }
}
