use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::AppError;

/// Append-only marker recording that the user opened a job. Consulted by
/// the feed filter, never mutated, and survives snapshot replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ViewedJob {
    pub job_id: String,
    pub viewed_at: DateTime<Utc>,
}

impl ViewedJob {
    pub async fn mark(pool: &SqlitePool, job_id: &str) -> Result<(), AppError> {
        sqlx::query("INSERT OR IGNORE INTO viewed_jobs (job_id, viewed_at) VALUES ($1, $2)")
            .bind(job_id)
            .bind(Utc::now())
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<ViewedJob>, AppError> {
        let viewed = sqlx::query_as::<_, ViewedJob>(
            "SELECT job_id, viewed_at FROM viewed_jobs ORDER BY viewed_at ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(viewed)
    }
}
