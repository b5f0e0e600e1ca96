use async_trait::async_trait;
use sqlx::PgPool;

use super::{Backend, HomeBackend};
use crate::constants::DEFAULT_HOME_LIMIT;
use crate::error::Result;
use crate::models::Location;

const CREATE_HOME: &str = r#"
CREATE TABLE IF NOT EXISTS home (
    home_id      BIGSERIAL PRIMARY KEY,
    player_uuid  VARCHAR(36) UNIQUE NOT NULL,
    home_limit   INTEGER NOT NULL DEFAULT 3
)
"#;

const CREATE_HOME_DATA: &str = r#"
CREATE TABLE IF NOT EXISTS home_data (
    home_data_id   BIGSERIAL PRIMARY KEY,
    home_data_name TEXT NOT NULL,
    loc_x          DOUBLE PRECISION NOT NULL,
    loc_y          DOUBLE PRECISION NOT NULL,
    loc_z          DOUBLE PRECISION NOT NULL,
    player_uuid    VARCHAR(36) NOT NULL,
    CONSTRAINT uniq_player_name UNIQUE (player_uuid, home_data_name),
    CONSTRAINT fk_home_player FOREIGN KEY (player_uuid)
        REFERENCES home(player_uuid) ON DELETE CASCADE
)
"#;

/// Client/server store on PostgreSQL
#[derive(Clone)]
pub struct PostgresHomes {
    pool: PgPool,
}

impl PostgresHomes {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HomeBackend for PostgresHomes {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    async fn provision_schema(&self) -> Result<()> {
        sqlx::query(CREATE_HOME).execute(&self.pool).await?;
        sqlx::query(CREATE_HOME_DATA).execute(&self.pool).await?;
        Ok(())
    }

    async fn ensure_quota_row(&self, user_id: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO home (player_uuid, home_limit) VALUES ($1, $2) \
             ON CONFLICT (player_uuid) DO NOTHING",
        )
        .bind(user_id)
        .bind(DEFAULT_HOME_LIMIT)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn home_limit(&self, user_id: &str) -> Result<Option<i32>> {
        let limit: Option<i32> =
            sqlx::query_scalar("SELECT home_limit FROM home WHERE player_uuid = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(limit)
    }

    async fn update_home_limit(&self, user_id: &str, limit: i32) -> Result<()> {
        sqlx::query("UPDATE home SET home_limit = $1 WHERE player_uuid = $2")
            .bind(limit)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_homes(&self, user_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM home_data WHERE player_uuid = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn home_exists(&self, user_id: &str, name: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM home_data WHERE player_uuid = $1 AND home_data_name = $2)",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_home(&self, user_id: &str, name: &str, location: Location) -> Result<()> {
        sqlx::query(
            "INSERT INTO home_data (home_data_name, loc_x, loc_y, loc_z, player_uuid) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(name)
        .bind(location.x)
        .bind(location.y)
        .bind(location.z)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_home(&self, user_id: &str, name: &str) -> Result<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT loc_x AS x, loc_y AS y, loc_z AS z FROM home_data \
             WHERE player_uuid = $1 AND home_data_name = $2",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(location)
    }

    async fn delete_home(&self, user_id: &str, name: &str) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM home_data WHERE player_uuid = $1 AND home_data_name = $2")
                .bind(user_id)
                .bind(name)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn home_names(&self, user_id: &str) -> Result<Vec<String>> {
        // array_agg over zero rows is NULL rather than an empty array.
        // "C" collation gives the same byte ordering as the other engines.
        let names: Option<Vec<String>> = sqlx::query_scalar(
            "SELECT array_agg(home_data_name \
             ORDER BY lower(home_data_name) COLLATE \"C\", home_data_name COLLATE \"C\") \
             FROM home_data WHERE player_uuid = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(names.unwrap_or_default())
    }

    async fn delete_quota_row(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM home WHERE player_uuid = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
