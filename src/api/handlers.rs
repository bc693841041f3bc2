use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

use crate::database::repositories::{
    GoalRepository, GoalRepositoryImpl, WeightRepository, WeightRepositoryImpl,
};
use crate::database::{Database, StorageProbe};
use crate::tracker::{TrackerError, ValidationError};

use super::responses::*;

/// Shared application state
///
/// Holds no request data; every handler goes straight to storage.
#[derive(Clone)]
pub struct AppState {
    pub weight_repository: Arc<dyn WeightRepository>,
    pub goal_repository: Arc<dyn GoalRepository>,
    pub storage: Arc<dyn StorageProbe>,
}

impl AppState {
    /// Wire repositories and the health probe to one database handle
    pub fn from_database(database: &Database) -> Self {
        let db = database.clone();
        let weight_repository =
            Arc::new(WeightRepositoryImpl::new(move || db.get_conn())) as Arc<dyn WeightRepository>;

        let db = database.clone();
        let goal_repository =
            Arc::new(GoalRepositoryImpl::new(move || db.get_conn())) as Arc<dyn GoalRepository>;

        Self {
            weight_repository,
            goal_repository,
            storage: Arc::new(database.clone()),
        }
    }
}

/// Convert TrackerError to HTTP response
impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        if self.is_validation_error() || self.is_state_error() {
            tracing::debug!(error = %self, "Request rejected");
        }

        let (status, error, details) = match &self {
            TrackerError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                validation_summary(err),
                Some(err.to_string()),
            ),
            TrackerError::WeightNotFound(_) => (StatusCode::NOT_FOUND, "Weight entry not found", None),
            TrackerError::DuplicateDate(date) => (
                StatusCode::CONFLICT,
                "Weight entry already exists for this date",
                Some(date.to_string()),
            ),
            TrackerError::Storage(err) => {
                tracing::error!(error = %err, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal database error occurred", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

/// Short, user-facing headline for a rejected request
fn validation_summary(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::InvalidId(_) => "Invalid weight ID",
        err if err.is_date_error() => "Invalid date",
        _ => "Invalid request",
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthResponse),
        (status = 500, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    match state.storage.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                database: "connected".to_string(),
                timestamp,
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    database: "disconnected".to_string(),
                    timestamp,
                }),
            )
        }
    }
}
