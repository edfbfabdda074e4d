use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::AppError;

/// Global frequency of one title token within the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: i64,
}

impl KeywordCount {
    /// Keywords ordered most frequent first. Ordering is applied here at
    /// read time; the indexer makes no ordering promise.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<KeywordCount>, AppError> {
        let keywords = sqlx::query_as::<_, KeywordCount>(
            "SELECT keyword, count FROM keyword_counts ORDER BY count DESC, keyword ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(keywords)
    }

    pub async fn insert_all(
        tx: &mut Transaction<'_, Sqlite>,
        keywords: &[KeywordCount],
    ) -> Result<(), AppError> {
        for kw in keywords {
            sqlx::query("INSERT INTO keyword_counts (keyword, count) VALUES ($1, $2)")
                .bind(&kw.keyword)
                .bind(kw.count)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}
