use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel::RunQueryDsl;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Type alias for SQLite connection pool
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Type alias for pooled connection
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Path that selects a private in-memory database per connection
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Key of the single settings row that stores the goal weight
pub const GOAL_WEIGHT_KEY: &str = "goal_weight";

/// Tables, the descending date index, and the seeded goal row.
///
/// Every statement is idempotent so opening an existing file is safe.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS weights (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL UNIQUE,
    pounds REAL NOT NULL,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_weights_date ON weights(date DESC);

CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT,
    updated_at TIMESTAMP
);

INSERT OR IGNORE INTO settings (key, value, updated_at) VALUES ('goal_weight', NULL, NULL);
"#;

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Schema initialization error: {0}")]
    SchemaError(String),

    #[error("Stored value for {key} is unreadable: {reason}")]
    CorruptValue { key: String, reason: String },

    #[error("Blocking database task failed: {0}")]
    TaskFailed(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

/// Per-connection pragmas applied whenever the pool opens a connection
#[derive(Debug)]
struct SqlitePragmas {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL;",
            self.busy_timeout.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

/// Storage handle owning the SQLite connection pool
///
/// Opened once at startup and shared (cheaply cloned) by the repositories.
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// Open the database file, build the pool, and create the schema
    ///
    /// # Arguments
    /// * `database_path` - SQLite file path, or `:memory:`
    /// * `pool_size` - Maximum number of pooled connections
    pub fn open(database_path: &str, pool_size: u32) -> Result<Self, DatabaseError> {
        tracing::info!("Initializing database at: {}", database_path);

        // each in-memory connection is its own database
        let pool_size = if database_path == IN_MEMORY_PATH {
            1
        } else {
            pool_size.max(1)
        };

        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(SqlitePragmas {
                busy_timeout: Duration::from_secs(5),
            }))
            .build(manager)
            .map_err(|e| DatabaseError::ConnectionFailed(format!("{}: {}", database_path, e)))?;

        tracing::info!("Database pool created with max size: {}", pool_size);

        let database = Self {
            pool: Arc::new(pool),
        };
        database.initialize_schema()?;

        tracing::info!("Database initialized successfully");
        Ok(database)
    }

    /// Get a connection from the pool
    pub fn get_conn(&self) -> Result<SqlitePooledConnection, DatabaseError> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::ConnectionPoolError(e.to_string()))
    }

    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        let mut conn = self.get_conn()?;
        conn.batch_execute(SCHEMA_SQL)
            .map_err(|e| DatabaseError::SchemaError(e.to_string()))
    }

    /// Round-trip a trivial query to prove storage is reachable
    pub fn check_connection(&self) -> Result<(), DatabaseError> {
        let mut conn = self.get_conn()?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .map(|_| ())
            .map_err(|e| DatabaseError::QueryError(e.to_string()))
    }

    /// Release the pool. Connections close once the last clone is dropped.
    pub fn close(self) {
        tracing::info!(
            "Closing database ({} pooled connections)",
            self.pool.state().connections
        );
    }
}

/// Reachability probe used by the health endpoint
#[async_trait::async_trait]
pub trait StorageProbe: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait::async_trait]
impl StorageProbe for Database {
    async fn ping(&self) -> Result<(), DatabaseError> {
        let database = self.clone();
        tokio::task::spawn_blocking(move || database.check_connection())
            .await
            .map_err(|e| DatabaseError::TaskFailed(e.to_string()))?
    }
}
