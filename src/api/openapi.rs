use utoipa::OpenApi;

use crate::api::responses::*;
use crate::api::{goal_handlers, handlers, weight_handlers};

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weight Tracker API",
        version = "1.0.0",
        description = "Daily body-weight log with an optional goal weight"
    ),
    paths(
        handlers::health_check,
        weight_handlers::list_weights,
        weight_handlers::get_weight,
        weight_handlers::create_weight,
        weight_handlers::update_weight,
        weight_handlers::delete_weight,
        goal_handlers::get_goal,
        goal_handlers::update_goal,
    ),
    components(
        schemas(
            WeightInput,
            WeightResponse,
            WeightListResponse,
            GoalInput,
            GoalResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Weights", description = "Weight entry management"),
        (name = "Goal", description = "Goal weight setting"),
    )
)]
pub struct ApiDoc;
