use crate::database::connection::{DatabaseError, SqlitePooledConnection, GOAL_WEIGHT_KEY};
use crate::database::models::{GoalSetting, Setting};
use crate::database::schema::settings;
use crate::tracker::TrackerError;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use super::{with_connection, ConnectionProvider};

/// Goal repository trait - the single optional goal weight
#[async_trait::async_trait]
pub trait GoalRepository: Send + Sync {
    /// Current goal state
    async fn get_goal(&self) -> Result<GoalSetting, TrackerError>;

    /// Overwrite the goal (`None` clears it) and return the stored state
    async fn set_goal(&self, pounds: Option<f64>) -> Result<GoalSetting, TrackerError>;
}

/// Concrete implementation of GoalRepository backed by the `settings` table
pub struct GoalRepositoryImpl {
    get_conn: ConnectionProvider,
}

impl GoalRepositoryImpl {
    /// Create new goal repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

fn read_goal(conn: &mut SqlitePooledConnection) -> Result<GoalSetting, TrackerError> {
    let row = settings::table
        .find(GOAL_WEIGHT_KEY)
        .first::<Setting>(conn)
        .optional()?;

    match row {
        Some(setting) => Ok(GoalSetting::try_from(setting)?),
        None => Ok(GoalSetting::default()),
    }
}

#[async_trait::async_trait]
impl GoalRepository for GoalRepositoryImpl {
    async fn get_goal(&self) -> Result<GoalSetting, TrackerError> {
        with_connection(&self.get_conn, read_goal).await
    }

    async fn set_goal(&self, pounds: Option<f64>) -> Result<GoalSetting, TrackerError> {
        with_connection(&self.get_conn, move |conn| {
            let value = pounds.map(|p| p.to_string());
            let now = Some(Utc::now().naive_utc());

            // upsert keeps the row invariant even if the seed row went missing
            diesel::insert_into(settings::table)
                .values((
                    settings::key.eq(GOAL_WEIGHT_KEY),
                    settings::value.eq(&value),
                    settings::updated_at.eq(now),
                ))
                .on_conflict(settings::key)
                .do_update()
                .set((settings::value.eq(&value), settings::updated_at.eq(now)))
                .execute(conn)?;

            tracing::debug!("Goal weight set to {:?}", pounds);
            read_goal(conn)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::open_temp_database;
    use crate::database::Database;
    use std::time::Duration;

    fn repository(db: &Database) -> GoalRepositoryImpl {
        let db = db.clone();
        GoalRepositoryImpl::new(move || db.get_conn())
    }

    #[tokio::test]
    async fn test_goal_starts_unset() {
        let (_dir, db) = open_temp_database();
        let goal = repository(&db).get_goal().await.unwrap();

        assert_eq!(goal.pounds, None);
        assert_eq!(goal.updated_at, None);
    }

    #[tokio::test]
    async fn test_set_then_get_goal() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        let stored = repo.set_goal(Some(160.5)).await.unwrap();
        assert_eq!(stored.pounds, Some(160.5));
        assert!(stored.updated_at.is_some());

        assert_eq!(repo.get_goal().await.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_clearing_goal_keeps_and_refreshes_timestamp() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        let set = repo.set_goal(Some(160.5)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        repo.set_goal(None).await.unwrap();

        let cleared = repo.get_goal().await.unwrap();
        assert_eq!(cleared.pounds, None);
        assert!(cleared.updated_at.unwrap() > set.updated_at.unwrap());
    }

    #[tokio::test]
    async fn test_set_goal_recreates_missing_row() {
        let (_dir, db) = open_temp_database();
        {
            let mut conn = db.get_conn().unwrap();
            diesel::delete(settings::table).execute(&mut conn).unwrap();
        }
        let repo = repository(&db);

        assert_eq!(repo.get_goal().await.unwrap(), GoalSetting::default());
        let goal = repo.set_goal(Some(150.0)).await.unwrap();
        assert_eq!(goal.pounds, Some(150.0));
    }
}
