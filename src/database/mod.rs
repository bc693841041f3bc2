/// Database module for SQLite persistence
///
/// This module provides:
/// - The `Database` handle owning an r2d2 connection pool
/// - Schema creation for the `weights` and `settings` tables
/// - Repository traits and their diesel implementations

pub mod connection;
pub mod models;
pub mod repositories;
pub mod schema;

pub use connection::{Database, DatabaseError, StorageProbe};
