use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::tracker::{today_utc, TrackerError, ValidationError};

use super::handlers::AppState;
use super::responses::*;

fn weight_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ValidationError> {
    id.map(|Path(id)| id)
        .map_err(|e| ValidationError::InvalidId(e.body_text()))
}

fn weight_body(payload: Result<Json<WeightInput>, JsonRejection>) -> Result<WeightInput, ValidationError> {
    payload
        .map(|Json(input)| input)
        .map_err(|e| ValidationError::MalformedBody(e.body_text()))
}

/// List weight entries, optionally bounded by date
///
/// Never rejects its query: bounds are compared as text and an unreadable
/// query string lists everything.
#[utoipa::path(
    get,
    path = "/api/v1/weights",
    tag = "Weights",
    params(WeightQueryParams),
    responses(
        (status = 200, description = "Entries ordered by date, newest first", body = WeightListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_weights(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<WeightListResponse>, TrackerError> {
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_else(|e| {
        tracing::debug!("Ignoring unreadable weight list query: {}", e.body_text());
        Vec::new()
    });
    let filter = WeightQueryParams::from_pairs(pairs).into_filter();

    let weights = state.weight_repository.list(filter).await?;

    Ok(Json(WeightListResponse {
        weights: weights.into_iter().map(WeightResponse::from).collect(),
    }))
}

/// Get a single weight entry
#[utoipa::path(
    get,
    path = "/api/v1/weights/{id}",
    tag = "Weights",
    params(
        ("id" = i64, Path, description = "Weight entry ID")
    ),
    responses(
        (status = 200, description = "Weight entry", body = WeightResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Weight entry not found", body = ErrorResponse)
    )
)]
pub async fn get_weight(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<WeightResponse>, TrackerError> {
    let id = weight_id(id)?;
    let entry = state.weight_repository.get(id).await?;
    Ok(Json(entry.into()))
}

/// Record a weight for a day
#[utoipa::path(
    post,
    path = "/api/v1/weights",
    tag = "Weights",
    request_body = WeightInput,
    responses(
        (status = 201, description = "Weight entry created", body = WeightResponse),
        (status = 400, description = "Invalid date or weight", body = ErrorResponse),
        (status = 409, description = "An entry already exists for this date", body = ErrorResponse)
    )
)]
pub async fn create_weight(
    State(state): State<AppState>,
    payload: Result<Json<WeightInput>, JsonRejection>,
) -> Result<(StatusCode, Json<WeightResponse>), TrackerError> {
    let weight = weight_body(payload)?.validate(today_utc())?;

    let entry = state
        .weight_repository
        .create(weight.date, weight.pounds)
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Replace the date and weight of an entry
#[utoipa::path(
    put,
    path = "/api/v1/weights/{id}",
    tag = "Weights",
    params(
        ("id" = i64, Path, description = "Weight entry ID")
    ),
    request_body = WeightInput,
    responses(
        (status = 200, description = "Weight entry updated", body = WeightResponse),
        (status = 400, description = "Invalid ID, date or weight", body = ErrorResponse),
        (status = 404, description = "Weight entry not found", body = ErrorResponse),
        (status = 409, description = "Another entry already uses this date", body = ErrorResponse)
    )
)]
pub async fn update_weight(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<WeightInput>, JsonRejection>,
) -> Result<Json<WeightResponse>, TrackerError> {
    let id = weight_id(id)?;
    let weight = weight_body(payload)?.validate(today_utc())?;

    let entry = state
        .weight_repository
        .update(id, weight.date, weight.pounds)
        .await?;

    Ok(Json(entry.into()))
}

/// Delete a weight entry
#[utoipa::path(
    delete,
    path = "/api/v1/weights/{id}",
    tag = "Weights",
    params(
        ("id" = i64, Path, description = "Weight entry ID")
    ),
    responses(
        (status = 204, description = "Weight entry deleted"),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Weight entry not found", body = ErrorResponse)
    )
)]
pub async fn delete_weight(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, TrackerError> {
    let id = weight_id(id)?;
    state.weight_repository.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
