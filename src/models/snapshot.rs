use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::job::JobPosting;
use crate::models::keyword::KeywordCount;
use crate::models::viewed::ViewedJob;

/// The complete dataset one refresh run produces, as returned to the
/// presentation layer.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub jobs: Vec<JobPosting>,
    pub keyword_counts: Vec<KeywordCount>,
    pub viewed_jobs: Vec<ViewedJob>,
}

impl Snapshot {
    /// Atomically replace the stored job set and keyword table.
    /// Clear-then-bulk-insert inside one transaction: readers see the
    /// old snapshot or the new one, never a mix. The viewed-jobs log is
    /// untouched.
    pub async fn replace(
        pool: &SqlitePool,
        jobs: &[JobPosting],
        keywords: &[KeywordCount],
    ) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM job_postings")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM keyword_counts")
            .execute(&mut *tx)
            .await?;
        JobPosting::insert_all(&mut tx, jobs).await?;
        KeywordCount::insert_all(&mut tx, keywords).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Read the last persisted snapshot without re-fetching.
    pub async fn load(pool: &SqlitePool) -> Result<Snapshot, AppError> {
        Ok(Snapshot {
            jobs: JobPosting::list(pool).await?,
            keyword_counts: KeywordCount::list(pool).await?,
            viewed_jobs: ViewedJob::list(pool).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn job(id: &str, title: &str) -> JobPosting {
        JobPosting {
            job_id: id.to_string(),
            run_id: "1700000000000".to_string(),
            collection_slug: "remote-jobs".to_string(),
            urn: format!("urn:li:fsd_jobPostingCard:({id},JOB_DETAILS)"),
            title: title.to_string(),
            company: "Acme".to_string(),
            company_link: None,
            location: "Remote".to_string(),
            remote: true,
            salary: "Not specified".to_string(),
            listing_date: "1700000000000".to_string(),
            reposted: false,
            applicant_count: "?".to_string(),
            promoted: false,
            easy_apply: false,
            apply_url: None,
            description: None,
            company_alumni: None,
            school_alumni: None,
            connections: None,
        }
    }

    #[tokio::test]
    async fn replace_is_wholesale() {
        let pool = db::test_pool().await;
        let first = vec![job("1", "Backend Engineer"), job("2", "Data Engineer")];
        let kw1 = vec![KeywordCount {
            keyword: "engineer".to_string(),
            count: 2,
        }];
        Snapshot::replace(&pool, &first, &kw1).await.unwrap();

        let second = vec![job("3", "Platform Engineer")];
        let kw2 = vec![
            KeywordCount {
                keyword: "platform".to_string(),
                count: 1,
            },
            KeywordCount {
                keyword: "engineer".to_string(),
                count: 1,
            },
        ];
        Snapshot::replace(&pool, &second, &kw2).await.unwrap();

        let snapshot = Snapshot::load(&pool).await.unwrap();
        assert_eq!(snapshot.jobs.len(), 1);
        assert_eq!(snapshot.jobs[0].job_id, "3");
        assert_eq!(snapshot.keyword_counts.len(), 2);
        // read ordering: count desc, then keyword
        assert_eq!(snapshot.keyword_counts[0].keyword, "engineer");
    }

    #[tokio::test]
    async fn viewed_log_survives_replacement() {
        let pool = db::test_pool().await;
        Snapshot::replace(&pool, &[job("1", "Backend Engineer")], &[])
            .await
            .unwrap();
        ViewedJob::mark(&pool, "1").await.unwrap();
        ViewedJob::mark(&pool, "1").await.unwrap(); // idempotent

        Snapshot::replace(&pool, &[job("2", "Data Engineer")], &[])
            .await
            .unwrap();
        let snapshot = Snapshot::load(&pool).await.unwrap();
        assert_eq!(snapshot.viewed_jobs.len(), 1);
        assert_eq!(snapshot.viewed_jobs[0].job_id, "1");
    }
}
