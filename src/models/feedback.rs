use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateFeedback {
    #[serde(rename = "type")]
    pub kind: String,
    pub email: String,
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: String,
    pub kind: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub async fn create(pool: &SqlitePool, input: CreateFeedback) -> Result<Feedback, AppError> {
        let feedback = Feedback {
            id: Uuid::new_v4().to_string(),
            kind: input.kind,
            email: input.email,
            subject: input.subject,
            description: input.description,
            created_at: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO feedback (id, kind, email, subject, description, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&feedback.id)
        .bind(&feedback.kind)
        .bind(&feedback.email)
        .bind(&feedback.subject)
        .bind(&feedback.description)
        .bind(feedback.created_at)
        .execute(pool)
        .await?;
        Ok(feedback)
    }
}
