use async_trait::async_trait;
use sqlx::MySqlPool;

use super::{Backend, HomeBackend};
use crate::constants::{DEFAULT_HOME_LIMIT, NAME_LIST_SEPARATOR};
use crate::error::Result;
use crate::models::Location;

// utf8mb4_bin keeps ids, names and the unique keys case-sensitive like the other engines
const CREATE_HOME: &str = r#"
CREATE TABLE IF NOT EXISTS home (
    home_id     BIGINT PRIMARY KEY AUTO_INCREMENT,
    player_uuid VARCHAR(36) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL UNIQUE,
    home_limit  INT NOT NULL DEFAULT 3
) ENGINE=InnoDB
"#;

const CREATE_HOME_DATA: &str = r#"
CREATE TABLE IF NOT EXISTS home_data (
    home_data_id   BIGINT PRIMARY KEY AUTO_INCREMENT,
    home_data_name VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
    loc_x          DOUBLE NOT NULL,
    loc_y          DOUBLE NOT NULL,
    loc_z          DOUBLE NOT NULL,
    player_uuid    VARCHAR(36) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
    UNIQUE KEY uniq_player_name (player_uuid, home_data_name),
    CONSTRAINT fk_home_player FOREIGN KEY (player_uuid)
        REFERENCES home(player_uuid) ON DELETE CASCADE
) ENGINE=InnoDB
"#;

/// Client/server store on MySQL (InnoDB)
#[derive(Clone)]
pub struct MySqlHomes {
    pool: MySqlPool,
}

impl MySqlHomes {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Split a `GROUP_CONCAT` result; NULL (no rows) yields an empty list
fn unpack_names(packed: Option<String>) -> Vec<String> {
    packed
        .map(|s| {
            s.split(NAME_LIST_SEPARATOR)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl HomeBackend for MySqlHomes {
    fn backend(&self) -> Backend {
        Backend::MySql
    }

    async fn provision_schema(&self) -> Result<()> {
        sqlx::query(CREATE_HOME).execute(&self.pool).await?;
        sqlx::query(CREATE_HOME_DATA).execute(&self.pool).await?;
        Ok(())
    }

    async fn ensure_quota_row(&self, user_id: &str) -> Result<()> {
        sqlx::query("INSERT IGNORE INTO home (player_uuid, home_limit) VALUES (?, ?)")
            .bind(user_id)
            .bind(DEFAULT_HOME_LIMIT)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn home_limit(&self, user_id: &str) -> Result<Option<i32>> {
        let limit: Option<i32> =
            sqlx::query_scalar("SELECT home_limit FROM home WHERE player_uuid = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(limit)
    }

    async fn update_home_limit(&self, user_id: &str, limit: i32) -> Result<()> {
        sqlx::query("UPDATE home SET home_limit = ? WHERE player_uuid = ?")
            .bind(limit)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_homes(&self, user_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM home_data WHERE player_uuid = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn home_exists(&self, user_id: &str, name: &str) -> Result<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM home_data WHERE player_uuid = ? AND home_data_name = ? LIMIT 1",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    async fn insert_home(&self, user_id: &str, name: &str, location: Location) -> Result<()> {
        sqlx::query(
            "INSERT INTO home_data (home_data_name, loc_x, loc_y, loc_z, player_uuid) \
             VALUES (?, ?, ?, ?, ?)",
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
             WHERE player_uuid = ? AND home_data_name = ?",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(location)
    }

    async fn delete_home(&self, user_id: &str, name: &str) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM home_data WHERE player_uuid = ? AND home_data_name = ?")
                .bind(user_id)
                .bind(name)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn home_names(&self, user_id: &str) -> Result<Vec<String>> {
        let packed: Option<String> = sqlx::query_scalar(
            "SELECT GROUP_CONCAT(home_data_name \
             ORDER BY LOWER(home_data_name) ASC, home_data_name ASC SEPARATOR ',') \
             FROM home_data WHERE player_uuid = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(unpack_names(packed))
    }

    async fn delete_quota_row(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM home WHERE player_uuid = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
