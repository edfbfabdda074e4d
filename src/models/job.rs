use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::AppError;

/// Sentinel for an applicant count the listing page did not reveal.
/// The only trigger for detail enrichment.
pub const UNKNOWN_APPLICANT_COUNT: &str = "?";

/// Sentinel for listings without a parseable salary.
pub const SALARY_NOT_SPECIFIED: &str = "Not specified";

/// One canonical job record. At most one survives per `job_id` within a
/// snapshot; a refresh replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobPosting {
    pub job_id: String,
    pub run_id: String,
    pub collection_slug: String,
    pub urn: String,
    pub title: String,
    pub company: String,
    pub company_link: Option<String>,
    pub location: String,
    pub remote: bool,
    pub salary: String,
    pub listing_date: String,
    pub reposted: bool,
    pub applicant_count: String,
    pub promoted: bool,
    pub easy_apply: bool,
    pub apply_url: Option<String>,
    pub description: Option<String>,
    pub company_alumni: Option<i64>,
    pub school_alumni: Option<i64>,
    pub connections: Option<i64>,
}

impl JobPosting {
    pub fn needs_detail(&self) -> bool {
        self.applicant_count == UNKNOWN_APPLICANT_COUNT
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<JobPosting>, AppError> {
        let jobs = sqlx::query_as::<_, JobPosting>(
            "SELECT * FROM job_postings ORDER BY listing_date DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }

    /// Insert one snapshot's worth of jobs inside an open transaction.
    /// `snapshot::replace` clears the table first.
    pub async fn insert_all(
        tx: &mut Transaction<'_, Sqlite>,
        jobs: &[JobPosting],
    ) -> Result<(), AppError> {
        for job in jobs {
            sqlx::query(
                "INSERT INTO job_postings (job_id, run_id, collection_slug, urn, title, company, company_link, location, remote, salary, listing_date, reposted, applicant_count, promoted, easy_apply, apply_url, description, company_alumni, school_alumni, connections) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)",
            )
            .bind(&job.job_id)
            .bind(&job.run_id)
            .bind(&job.collection_slug)
            .bind(&job.urn)
            .bind(&job.title)
            .bind(&job.company)
            .bind(&job.company_link)
            .bind(&job.location)
            .bind(job.remote)
            .bind(&job.salary)
            .bind(&job.listing_date)
            .bind(job.reposted)
            .bind(&job.applicant_count)
            .bind(job.promoted)
            .bind(job.easy_apply)
            .bind(&job.apply_url)
            .bind(&job.description)
            .bind(job.company_alumni)
            .bind(job.school_alumni)
            .bind(job.connections)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
