use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ConfigError;

use super::goal_handlers::*;
use super::handlers::{health_check, AppState};
use super::openapi::ApiDoc;
use super::weight_handlers::*;

/// Create the API router with Swagger UI and request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Health check
        .route("/health", get(health_check))
        // Weight endpoints
        .route("/api/v1/weights", get(list_weights).post(create_weight))
        .route(
            "/api/v1/weights/:id",
            get(get_weight).put(update_weight).delete(delete_weight),
        )
        // Goal endpoints
        .route("/api/v1/goal", get(get_goal).put(update_goal))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for the single configured frontend origin
pub fn cors_layer(origin: &str) -> Result<CorsLayer, ConfigError> {
    let origin = HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidValue {
        key: "CORS_ORIGIN",
        value: origin.to_string(),
        reason: e.to_string(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true))
}
