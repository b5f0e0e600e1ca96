pub mod mysql;
pub mod pool;
pub mod postgres;
pub mod sqlite;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Location;

pub use mysql::MySqlHomes;
pub use postgres::PostgresHomes;
pub use sqlite::SqliteHomes;

/// The SQL engines a home store can run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    MySql,
    Postgres,
}

impl Backend {
    /// Parse a `DATABASE_TYPE` value, falling back to SQLite for anything unknown
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Backend::Sqlite,
            "mysql" => Backend::MySql,
            "postgresql" | "postgres" => Backend::Postgres,
            other => {
                tracing::warn!("Unknown database type '{}', defaulting to SQLite", other);
                Backend::Sqlite
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::MySql => "mysql",
            Backend::Postgres => "postgresql",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialect-specific storage primitives for quota rows and named homes.
///
/// Implementations surface every engine error; the fail-open contract the
/// rest of the crate relies on lives in [`crate::store::HomeStore`].
#[async_trait]
pub trait HomeBackend: Send + Sync {
    fn backend(&self) -> Backend;

    /// Create the `home` and `home_data` tables if they are missing
    async fn provision_schema(&self) -> Result<()>;

    /// Insert a quota row with the default limit unless one already exists
    async fn ensure_quota_row(&self, user_id: &str) -> Result<()>;

    async fn home_limit(&self, user_id: &str) -> Result<Option<i32>>;

    async fn update_home_limit(&self, user_id: &str, limit: i32) -> Result<()>;

    async fn count_homes(&self, user_id: &str) -> Result<i64>;

    /// Case-sensitive exact match on the home name
    async fn home_exists(&self, user_id: &str, name: &str) -> Result<bool>;

    /// Insert a new home; a duplicate name is a constraint error, never an overwrite
    async fn insert_home(&self, user_id: &str, name: &str, location: Location) -> Result<()>;

    async fn find_home(&self, user_id: &str, name: &str) -> Result<Option<Location>>;

    /// Returns the number of rows removed
    async fn delete_home(&self, user_id: &str, name: &str) -> Result<u64>;

    /// Names ordered case-insensitively, exact spelling breaking ties
    async fn home_names(&self, user_id: &str) -> Result<Vec<String>>;

    /// Remove the quota row; the foreign key cascades to the user's homes
    async fn delete_quota_row(&self, user_id: &str) -> Result<u64>;
}

/// Open the configured database and wrap it in the matching backend
pub async fn connect(config: &Config) -> Result<Arc<dyn HomeBackend>> {
    let max_connections = config.database_max_connections;

    let backend: Arc<dyn HomeBackend> = match config.database_type {
        Backend::Sqlite => {
            let pool = pool::create_sqlite_pool(&config.database_path, max_connections).await?;
            Arc::new(SqliteHomes::new(pool))
        }
        Backend::MySql => {
            let pool = pool::create_mysql_pool(database_url(config)?, max_connections).await?;
            Arc::new(MySqlHomes::new(pool))
        }
        Backend::Postgres => {
            let pool = pool::create_pg_pool(database_url(config)?, max_connections).await?;
            Arc::new(PostgresHomes::new(pool))
        }
    };

    Ok(backend)
}

fn database_url(config: &Config) -> Result<&str> {
    config.database_url.as_deref().ok_or_else(|| {
        AppError::Config(format!(
            "DATABASE_URL is required for {}",
            config.database_type
        ))
    })
}
