/// Repository implementations over the SQLite pool
///
/// Each repository is a trait (what handlers depend on) plus a concrete
/// diesel implementation fed by a connection provider. Diesel is
/// synchronous, so every call runs on tokio's blocking pool.

pub mod goal_repository;
pub mod weight_repository;

pub use goal_repository::{GoalRepository, GoalRepositoryImpl};
pub use weight_repository::{WeightRepository, WeightRepositoryImpl};

use crate::database::connection::{DatabaseError, SqlitePooledConnection};
use crate::tracker::TrackerError;
use std::sync::Arc;

/// Shared source of pooled connections handed to each repository
pub type ConnectionProvider =
    Arc<dyn Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync>;

/// Run a diesel closure on the blocking pool with a fresh pooled connection
pub(crate) async fn with_connection<T, F>(
    get_conn: &ConnectionProvider,
    work: F,
) -> Result<T, TrackerError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqlitePooledConnection) -> Result<T, TrackerError> + Send + 'static,
{
    let get_conn = Arc::clone(get_conn);
    tokio::task::spawn_blocking(move || {
        let mut conn = get_conn()?;
        work(&mut conn)
    })
    .await
    .map_err(|e| DatabaseError::TaskFailed(e.to_string()))?
}
