// Library Crate Root
// lib.rs

// main.rs imports through lib.rs like an external crate
pub mod api;
pub mod config;
pub mod database;
pub mod tracker;

// pub use = re-export at crate root
pub use api::{cors_layer, create_router, AppState};
pub use config::{AppConfig, ConfigError};
pub use database::{Database, DatabaseError};
pub use tracker::{TrackerError, ValidationError};
