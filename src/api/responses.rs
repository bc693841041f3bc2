use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::database::models::{DateRangeFilter, GoalSetting, WeightEntry};
use crate::tracker::{validate_goal_pounds, validate_weight, ValidWeight, ValidationError};

/// Request body for creating or replacing a weight entry
///
/// Both fields are optional at the JSON level so a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WeightInput {
    #[schema(example = "2026-01-15")]
    pub date: Option<String>,
    #[schema(example = 182.4)]
    pub pounds: Option<f64>,
}

impl WeightInput {
    pub fn validate(&self, today: NaiveDate) -> Result<ValidWeight, ValidationError> {
        validate_weight(self.date.as_deref(), self.pounds, today)
    }
}

/// Request body for setting or clearing the goal weight
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GoalInput {
    /// `null` or absent clears the goal
    #[schema(example = 160.5)]
    pub pounds: Option<f64>,
}

impl GoalInput {
    pub fn validate(&self) -> Result<Option<f64>, ValidationError> {
        validate_goal_pounds(self.pounds)
    }
}

/// Query parameters for listing weights
#[derive(Debug, Default, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeightQueryParams {
    /// Inclusive lower bound (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    pub end_date: Option<String>,
}

impl WeightQueryParams {
    /// Pick the bounds out of raw query pairs; a repeated key keeps its first value
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "start_date" => &mut params.start_date,
                "end_date" => &mut params.end_date,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    pub fn into_filter(self) -> DateRangeFilter {
        DateRangeFilter::from_bounds(self.start_date, self.end_date)
    }
}

/// A stored weight entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeightResponse {
    pub id: i64,
    #[schema(value_type = String, example = "2026-01-15")]
    pub date: NaiveDate,
    pub pounds: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WeightEntry> for WeightResponse {
    fn from(entry: WeightEntry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            pounds: entry.pounds,
            created_at: entry.created_at.and_utc(),
            updated_at: entry.updated_at.and_utc(),
        }
    }
}

/// Weight list wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeightListResponse {
    pub weights: Vec<WeightResponse>,
}

/// Goal weight state; both fields serialize as `null` when absent
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GoalResponse {
    pub pounds: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<GoalSetting> for GoalResponse {
    fn from(goal: GoalSetting) -> Self {
        Self {
            pounds: goal.pounds,
            updated_at: goal.updated_at.map(|ts| ts.and_utc()),
        }
    }
}

/// Health check body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "connected")]
    pub database: String,
    pub timestamp: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_goal_response_serializes_nulls() {
        let json = serde_json::to_value(GoalResponse::from(GoalSetting::default())).unwrap();
        assert_eq!(json, serde_json::json!({ "pounds": null, "updated_at": null }));
    }

    #[test]
    fn test_weight_response_shape() {
        let ts = NaiveDateTime::parse_from_str("2026-01-15 08:30:00", "%F %T").unwrap();
        let entry = WeightEntry {
            id: 3,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            pounds: 182.4,
            created_at: ts,
            updated_at: ts,
        };

        let json = serde_json::to_value(WeightResponse::from(entry)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["date"], "2026-01-15");
        assert_eq!(json["pounds"], 182.4);
        assert_eq!(json["created_at"], "2026-01-15T08:30:00Z");
    }

    #[test]
    fn test_query_pairs_keep_first_value() {
        let pairs = vec![
            ("start_date".to_string(), "2026-01-10".to_string()),
            ("page".to_string(), "2".to_string()),
            ("start_date".to_string(), "2026-01-20".to_string()),
            ("end_date".to_string(), String::new()),
        ];

        let params = WeightQueryParams::from_pairs(pairs);
        assert_eq!(params.start_date.as_deref(), Some("2026-01-10"));
        assert_eq!(params.end_date.as_deref(), Some(""));

        let filter = params.into_filter();
        assert_eq!(filter.start_date.as_deref(), Some("2026-01-10"));
        assert_eq!(filter.end_date, None);
    }

    #[test]
    fn test_goal_input_accepts_null_and_missing() {
        let explicit: GoalInput = serde_json::from_str(r#"{"pounds": null}"#).unwrap();
        let missing: GoalInput = serde_json::from_str("{}").unwrap();
        assert_eq!(explicit.validate(), Ok(None));
        assert_eq!(missing.validate(), Ok(None));
    }
}
