//! The refresh pipeline: aggregate every configured collection, dedup,
//! enrich, index keywords, persist the snapshot.

pub mod aggregate;
pub mod enrich;
pub mod keywords;
pub mod normalize;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::Semaphore;

use crate::config::Config;
use crate::error::AppError;
use crate::models::job::JobPosting;
use crate::models::keyword::KeywordCount;
use crate::models::snapshot::Snapshot;
use crate::source::{DetailSource, ListingSource};

/// Server-curated collection buckets we aggregate on every refresh.
pub const JOB_COLLECTION_SLUGS: &[&str] = &[
    "recommended",
    "remote-jobs",
    "unicorn-companies",
    "work-life-balance",
    "education",
    "apparel-and-fashion",
    "government",
    "it-services-and-it-consulting",
    "top-tech",
    "future-of-work",
    "hospitals-and-healthcare",
    "e-sports",
    "metaverse",
    "top-companies",
    "pro-sport-teams-and-leagues",
    "education-benefits",
    "easy-apply",
    "social-impact",
    "top-healthcare",
    "top-startups",
    "hybrid",
    "family-friendly",
    "gaming",
    "media",
    "non-profits",
    "small-business",
    "k-12-edu",
    "parental-leave",
    "career-growth",
    "female-founded",
    "transportation-and-logistics",
    "pharmaceuticals",
    "hospitality",
    "student-loan-assist",
    "publishing",
    "beauty",
    "climate-and-cleantech",
    "unlimited-vacation",
    "biotechnology",
    "entertainment",
    "yc-funded",
    "early-stage-startups",
    "gen-ai",
];

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub collections: Vec<String>,
    pub page_size: u32,
    pub max_pages: u32,
    pub collection_concurrency: usize,
    pub detail_batch_size: usize,
    pub detail_concurrency: usize,
    pub detail_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            collections: JOB_COLLECTION_SLUGS.iter().map(|s| s.to_string()).collect(),
            page_size: 50,
            max_pages: 4,
            collection_concurrency: 16,
            detail_batch_size: 20,
            detail_concurrency: 8,
            detail_retries: 0,
            retry_base_delay_ms: 1000,
        }
    }
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_pages: config.max_pages,
            collection_concurrency: config.collection_concurrency,
            detail_batch_size: config.detail_batch_size,
            detail_concurrency: config.detail_concurrency,
            detail_retries: config.detail_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
            ..Self::default()
        }
    }
}

/// One refresh run's in-memory result, pre-persistence.
pub struct RefreshOutcome {
    pub run_id: String,
    pub jobs: Vec<JobPosting>,
    pub keyword_counts: Vec<KeywordCount>,
}

pub struct JobPipeline {
    listing: Arc<dyn ListingSource>,
    detail: Arc<dyn DetailSource>,
    config: PipelineConfig,
}

impl JobPipeline {
    pub fn new(
        listing: Arc<dyn ListingSource>,
        detail: Arc<dyn DetailSource>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            listing,
            detail,
            config,
        }
    }

    /// Run a full refresh: every collection concurrently (bounded),
    /// flatten in configured slug order, dedup, enrich, index, persist.
    ///
    /// A persistence failure is logged and swallowed; the in-memory
    /// result is still returned. Anything failing before persistence
    /// propagates to the caller.
    pub async fn refresh(&self, pool: &SqlitePool) -> Result<RefreshOutcome, AppError> {
        let run_id = Utc::now().timestamp_millis().to_string();

        let semaphore = Arc::new(Semaphore::new(self.config.collection_concurrency.max(1)));
        let mut handles = Vec::new();
        for slug in &self.config.collections {
            let slug = slug.clone();
            let run_id = run_id.clone();
            let listing = Arc::clone(&self.listing);
            let semaphore = Arc::clone(&semaphore);
            let config = self.config.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                aggregate::collect_jobs(listing.as_ref(), &slug, &run_id, &config).await
            }));
        }

        // Join in slug order so the flattened sequence (and therefore
        // which duplicate wins) does not depend on completion order.
        let mut all_jobs: Vec<JobPosting> = Vec::new();
        for handle in handles {
            let mut jobs = handle
                .await
                .map_err(|e| AppError::Internal(format!("collection task failed: {e}")))?;
            all_jobs.append(&mut jobs);
        }

        let unique_jobs = dedup_by_job_id(all_jobs);
        tracing::info!("Total jobs after dedup: {}", unique_jobs.len());

        let enriched =
            enrich::enrich_jobs(Arc::clone(&self.detail), unique_jobs, &self.config).await;
        let keyword_counts = keywords::build_keyword_counts(&enriched);

        if let Err(e) = Snapshot::replace(pool, &enriched, &keyword_counts).await {
            tracing::error!("Error saving job snapshot: {e}");
        }

        Ok(RefreshOutcome {
            run_id,
            jobs: enriched,
            keyword_counts,
        })
    }
}

/// Deduplicate by job id. First occurrence keeps its position, the last
/// occurrence's value wins; with the flatten order fixed by the slug
/// list, later collections deliberately override earlier ones.
pub fn dedup_by_job_id(jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<JobPosting> = Vec::new();
    for job in jobs {
        match index.get(&job.job_id) {
            Some(&slot) => unique[slot] = job,
            None => {
                index.insert(job.job_id.clone(), unique.len());
                unique.push(job);
            }
        }
    }
    unique
}
