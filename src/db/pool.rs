use sqlx::{
    mysql::MySqlPoolOptions,
    postgres::PgPoolOptions,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Executor, MySqlPool, PgPool, SqlitePool,
};
use std::path::Path;
use std::time::Duration;

/// Room for the packed name list returned by `GROUP_CONCAT`
const MYSQL_GROUP_CONCAT_MAX_LEN: u32 = 1_048_576;

/// Open (creating if needed) a SQLite database file
pub async fn create_sqlite_pool(
    path: impl AsRef<Path>,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let path = path.as_ref();
    tracing::info!("Opening SQLite database at: {:?}", path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    tracing::info!("SQLite connection pool created successfully");

    Ok(pool)
}

/// Create a MySQL connection pool
pub async fn create_mysql_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<MySqlPool, sqlx::Error> {
    tracing::info!("Creating MySQL connection pool...");

    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute(
                    format!(
                        "SET SESSION group_concat_max_len = {}",
                        MYSQL_GROUP_CONCAT_MAX_LEN
                    )
                    .as_str(),
                )
                .await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    tracing::info!("MySQL connection pool created successfully");

    Ok(pool)
}

/// Create a PostgreSQL connection pool
pub async fn create_pg_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Creating PostgreSQL connection pool...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;

    tracing::info!("PostgreSQL connection pool created successfully");

    Ok(pool)
}
