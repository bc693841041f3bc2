use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::tracker::{TrackerError, ValidationError};

use super::handlers::AppState;
use super::responses::*;

/// Get the goal weight
#[utoipa::path(
    get,
    path = "/api/v1/goal",
    tag = "Goal",
    responses(
        (status = 200, description = "Current goal; fields are null when unset", body = GoalResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_goal(State(state): State<AppState>) -> Result<Json<GoalResponse>, TrackerError> {
    let goal = state.goal_repository.get_goal().await?;
    Ok(Json(goal.into()))
}

/// Set or clear the goal weight
#[utoipa::path(
    put,
    path = "/api/v1/goal",
    tag = "Goal",
    request_body = GoalInput,
    responses(
        (status = 200, description = "Stored goal", body = GoalResponse),
        (status = 400, description = "Goal weight must be positive", body = ErrorResponse)
    )
)]
pub async fn update_goal(
    State(state): State<AppState>,
    payload: Result<Json<GoalInput>, JsonRejection>,
) -> Result<Json<GoalResponse>, TrackerError> {
    let Json(input) = payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let pounds = input.validate()?;

    let goal = state.goal_repository.set_goal(pounds).await?;
    Ok(Json(goal.into()))
}
