use crate::database::connection::{DatabaseError, SqlitePooledConnection};
use crate::database::models::{DateRangeFilter, NewWeightEntry, WeightChanges, WeightEntry};
use crate::database::schema::weights;
use crate::tracker::TrackerError;
use chrono::{NaiveDate, Utc};
use diesel::dsl::{exists, sql};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Text;
use std::sync::Arc;

use super::{with_connection, ConnectionProvider};

/// Weight repository trait - CRUD and range listing over `weights`
///
/// `WeightNotFound` and `DuplicateDate` are returned as typed errors so the
/// API layer can map them without inspecting storage details.
#[async_trait::async_trait]
pub trait WeightRepository: Send + Sync {
    /// Entries inside the (inclusive, optional) bounds, newest date first
    async fn list(&self, filter: DateRangeFilter) -> Result<Vec<WeightEntry>, TrackerError>;

    /// Find entry by ID
    async fn get(&self, id: i64) -> Result<WeightEntry, TrackerError>;

    /// Insert a new entry; one entry per date
    async fn create(&self, date: NaiveDate, pounds: f64) -> Result<WeightEntry, TrackerError>;

    /// Overwrite date and weight of an existing entry
    async fn update(
        &self,
        id: i64,
        date: NaiveDate,
        pounds: f64,
    ) -> Result<WeightEntry, TrackerError>;

    /// Delete entry by ID
    async fn delete(&self, id: i64) -> Result<(), TrackerError>;
}

/// Concrete implementation of WeightRepository
pub struct WeightRepositoryImpl {
    get_conn: ConnectionProvider,
}

impl WeightRepositoryImpl {
    /// Create new weight repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

fn id_exists(conn: &mut SqlitePooledConnection, id: i64) -> Result<bool, TrackerError> {
    Ok(diesel::select(exists(weights::table.filter(weights::id.eq(id)))).get_result(conn)?)
}

fn date_taken(conn: &mut SqlitePooledConnection, date: NaiveDate) -> Result<bool, TrackerError> {
    Ok(diesel::select(exists(weights::table.filter(weights::date.eq(date)))).get_result(conn)?)
}

/// Map a write failure, turning a UNIQUE violation on `date` into a conflict
fn classify_write_error(err: DieselError, date: NaiveDate) -> TrackerError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TrackerError::DuplicateDate(date)
        }
        other => TrackerError::from(other),
    }
}

#[async_trait::async_trait]
impl WeightRepository for WeightRepositoryImpl {
    async fn list(&self, filter: DateRangeFilter) -> Result<Vec<WeightEntry>, TrackerError> {
        with_connection(&self.get_conn, move |conn| {
            let mut query = weights::table.into_boxed();

            // dates are stored as YYYY-MM-DD text, so text order is date order
            if let Some(start) = filter.start_date {
                query = query.filter(sql::<Text>("date").ge(start));
            }
            if let Some(end) = filter.end_date {
                query = query.filter(sql::<Text>("date").le(end));
            }

            Ok(query
                .order(weights::date.desc())
                .load::<WeightEntry>(conn)?)
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<WeightEntry, TrackerError> {
        with_connection(&self.get_conn, move |conn| {
            weights::table
                .find(id)
                .first::<WeightEntry>(conn)
                .optional()?
                .ok_or(TrackerError::WeightNotFound(id))
        })
        .await
    }

    async fn create(&self, date: NaiveDate, pounds: f64) -> Result<WeightEntry, TrackerError> {
        with_connection(&self.get_conn, move |conn| {
            if date_taken(conn, date)? {
                return Err(TrackerError::DuplicateDate(date));
            }

            // a concurrent insert can still win between the check and this
            // statement; the UNIQUE constraint reports it as a conflict
            let entry = diesel::insert_into(weights::table)
                .values(&NewWeightEntry::new(date, pounds, Utc::now().naive_utc()))
                .get_result::<WeightEntry>(conn)
                .map_err(|e| classify_write_error(e, date))?;

            tracing::debug!("Created weight entry {} for {}", entry.id, entry.date);
            Ok(entry)
        })
        .await
    }

    async fn update(
        &self,
        id: i64,
        date: NaiveDate,
        pounds: f64,
    ) -> Result<WeightEntry, TrackerError> {
        with_connection(&self.get_conn, move |conn| {
            if !id_exists(conn, id)? {
                return Err(TrackerError::WeightNotFound(id));
            }

            let changes = WeightChanges {
                date,
                pounds,
                updated_at: Utc::now().naive_utc(),
            };

            let entry = diesel::update(weights::table.find(id))
                .set(&changes)
                .get_result::<WeightEntry>(conn)
                .map_err(|e| classify_write_error(e, date))?;

            tracing::debug!("Updated weight entry {}", id);
            Ok(entry)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), TrackerError> {
        with_connection(&self.get_conn, move |conn| {
            if !id_exists(conn, id)? {
                return Err(TrackerError::WeightNotFound(id));
            }

            diesel::delete(weights::table.find(id)).execute(conn)?;

            tracing::debug!("Deleted weight entry {}", id);
            Ok(())
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

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn repository(db: &Database) -> WeightRepositoryImpl {
        let db = db.clone();
        WeightRepositoryImpl::new(move || db.get_conn())
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_values() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        let created = repo.create(day(2026, 1, 15), 182.4).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.date, day(2026, 1, 15));
        assert_eq!(fetched.pounds, 182.4);
    }

    #[tokio::test]
    async fn test_duplicate_date_is_a_conflict() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        repo.create(day(2026, 1, 15), 180.0).await.unwrap();
        let err = repo.create(day(2026, 1, 15), 181.0).await.unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateDate(d) if d == day(2026, 1, 15)));

        assert_eq!(repo.list(DateRangeFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_for_one_date() {
        let (_dir, db) = open_temp_database();
        let repo = Arc::new(repository(&db));

        let (a, b) = tokio::join!(
            {
                let repo = Arc::clone(&repo);
                async move { repo.create(day(2026, 2, 1), 175.0).await }
            },
            {
                let repo = Arc::clone(&repo);
                async move { repo.create(day(2026, 2, 1), 176.0).await }
            }
        );

        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(TrackerError::DuplicateDate(_))))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        assert!(matches!(
            repo.get(42).await,
            Err(TrackerError::WeightNotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        let entry = repo.create(day(2026, 1, 1), 190.0).await.unwrap();
        repo.delete(entry.id).await.unwrap();

        assert!(matches!(
            repo.get(entry.id).await,
            Err(TrackerError::WeightNotFound(_))
        ));
        assert!(matches!(
            repo.delete(entry.id).await,
            Err(TrackerError::WeightNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_leaves_storage_alone() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        let existing = repo.create(day(2026, 1, 1), 190.0).await.unwrap();
        let err = repo
            .update(existing.id + 100, day(2026, 1, 2), 150.0)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::WeightNotFound(_)));

        let all = repo.list(DateRangeFilter::default()).await.unwrap();
        assert_eq!(all, vec![existing]);
    }

    #[tokio::test]
    async fn test_update_refreshes_weight_and_timestamp() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        let created = repo.create(day(2026, 1, 5), 200.0).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = repo.update(created.id, day(2026, 1, 5), 198.5).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.pounds, 198.5);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched.pounds, 198.5);
        assert!(fetched.updated_at > created.created_at);
    }

    #[tokio::test]
    async fn test_update_onto_another_entrys_date_is_a_conflict() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        repo.create(day(2026, 1, 1), 190.0).await.unwrap();
        let second = repo.create(day(2026, 1, 2), 189.0).await.unwrap();

        let err = repo.update(second.id, day(2026, 1, 1), 188.0).await.unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateDate(_)));
        assert_eq!(repo.get(second.id).await.unwrap(), second);

        let moved = repo.update(second.id, day(2026, 1, 3), 188.0).await.unwrap();
        assert_eq!(moved.date, day(2026, 1, 3));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_by_date_descending() {
        let (_dir, db) = open_temp_database();
        let repo = repository(&db);

        for (d, p) in [(1, 190.0), (31, 186.0), (15, 188.0)] {
            repo.create(day(2026, 1, d), p).await.unwrap();
        }

        let all = repo.list(DateRangeFilter::default()).await.unwrap();
        let dates: Vec<_> = all.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![day(2026, 1, 31), day(2026, 1, 15), day(2026, 1, 1)]);

        let window = repo
            .list(DateRangeFilter::from_bounds(
                Some("2026-01-10".into()),
                Some("2026-01-20".into()),
            ))
            .await
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].date, day(2026, 1, 15));

        let from = repo
            .list(DateRangeFilter {
                start_date: Some("2026-01-15".into()),
                end_date: None,
            })
            .await
            .unwrap();
        assert_eq!(from.len(), 2);

        let until = repo
            .list(DateRangeFilter {
                start_date: None,
                end_date: Some("2026-01-01".into()),
            })
            .await
            .unwrap();
        assert_eq!(until.len(), 1);
        assert_eq!(until[0].date, day(2026, 1, 1));

        let partial = repo
            .list(DateRangeFilter::from_bounds(Some("2026-01-2".into()), None))
            .await
            .unwrap();
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].date, day(2026, 1, 31));

        let whole_month = repo
            .list(DateRangeFilter::from_bounds(Some("2026-01".into()), Some("2026-02".into())))
            .await
            .unwrap();
        assert_eq!(whole_month.len(), 3);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_storage_error() {
        let repo = WeightRepositoryImpl::new(|| {
            Err(DatabaseError::ConnectionPoolError("pool exhausted".to_string()))
        });

        assert!(matches!(
            repo.list(DateRangeFilter::default()).await,
            Err(TrackerError::Storage(DatabaseError::ConnectionPoolError(_)))
        ));
    }
}
