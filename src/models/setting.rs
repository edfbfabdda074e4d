use sqlx::SqlitePool;

use crate::error::AppError;

/// Small key-value settings persisted independently of job snapshots
/// (session token, saved filter options).
pub struct Setting;

pub const SESSION_TOKEN_KEY: &str = "session-token";
pub const FILTER_OPTIONS_KEY: &str = "filter-options";

impl Setting {
    pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<String>, AppError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|r| r.0))
    }

    pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }
}
