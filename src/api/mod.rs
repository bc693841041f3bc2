pub mod goal_handlers;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;
pub mod weight_handlers;

pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use responses::*;
pub use routes::{cors_layer, create_router};
