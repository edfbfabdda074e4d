//! Fills in applicant counts, apply URLs and networking signals for jobs
//! the listing pages left blank, via batched bulk detail lookups.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use percent_encoding::percent_decode_str;
use tokio::sync::Semaphore;

use crate::error::AppError;
use crate::models::job::JobPosting;
use crate::pipeline::PipelineConfig;
use crate::source::DetailSource;
use crate::source::raw::JobDetail;

/// Query marker the detail service appends to apply URLs for campaign
/// attribution; everything from it onward is dropped.
const TRACKING_MARKER: &str = "&trackingId=";

/// Enrich every job whose applicant count is still the unknown sentinel.
///
/// Batches run concurrently under the `detail_concurrency` bound and are
/// all joined before returning; a batch that exhausts its retries is
/// logged and dropped. Enrichment is best-effort and never fails the
/// refresh. Returns a new job sequence; the input records are not
/// mutated in place.
pub async fn enrich_jobs(
    source: Arc<dyn DetailSource>,
    jobs: Vec<JobPosting>,
    config: &PipelineConfig,
) -> Vec<JobPosting> {
    let needing: Vec<String> = jobs
        .iter()
        .filter(|j| j.needs_detail())
        .map(|j| j.job_id.clone())
        .collect();
    if needing.is_empty() {
        return jobs;
    }

    let semaphore = Arc::new(Semaphore::new(config.detail_concurrency.max(1)));
    let mut handles = Vec::new();
    for batch in needing.chunks(config.detail_batch_size.max(1)) {
        let batch = batch.to_vec();
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let retries = config.detail_retries;
        let base_delay_ms = config.retry_base_delay_ms;
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            fetch_batch(source.as_ref(), &batch, retries, base_delay_ms).await
        }));
    }

    let mut details: HashMap<String, JobDetail> = HashMap::new();
    for handle in handles {
        match handle.await {
            Ok(Ok(batch_details)) => details.extend(batch_details),
            Ok(Err(e)) => {
                tracing::error!("Error fetching batch job details after all retries: {e}");
            }
            Err(e) => {
                tracing::error!("Detail batch task panicked: {e}");
            }
        }
    }

    let resolved = details.values().filter(|d| d.num_applicants.is_some()).count();
    tracing::info!(
        "Enriched {resolved} of {} jobs needing details",
        needing.len()
    );

    merge_details(jobs, &details)
}

/// One batch with exponential-backoff retry: delay * 2^attempt between
/// attempts.
async fn fetch_batch(
    source: &dyn DetailSource,
    job_ids: &[String],
    retries: u32,
    base_delay_ms: u64,
) -> Result<HashMap<String, JobDetail>, AppError> {
    let mut attempt = 0u32;
    loop {
        match source.fetch_details(job_ids).await {
            Ok(details) => return Ok(details),
            Err(e) if attempt < retries => {
                let backoff = base_delay_ms.saturating_mul(1u64 << attempt.min(16));
                tracing::warn!(
                    "Batch of {} failed ({e}), retry in {backoff}ms ({} retries left)",
                    job_ids.len(),
                    retries - attempt
                );
                tokio::time::sleep(Duration::from_millis(backoff)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Pure merge of detail-lookup results into the job sequence. A per-job
/// error marker leaves the unknown sentinel untouched.
pub fn merge_details(
    jobs: Vec<JobPosting>,
    details: &HashMap<String, JobDetail>,
) -> Vec<JobPosting> {
    jobs.into_iter()
        .map(|mut job| {
            if let Some(detail) = details.get(&job.job_id) {
                if let Some(count) = &detail.num_applicants {
                    job.applicant_count = count.clone();
                }
                if let Some(url) = &detail.apply_url {
                    job.apply_url = Some(clean_apply_url(url));
                }
                if let Some(description) = &detail.description {
                    job.description = Some(description.clone());
                }
                job.company_alumni = detail.company_alumni.or(job.company_alumni);
                job.school_alumni = detail.school_alumni.or(job.school_alumni);
                job.connections = detail.connections.or(job.connections);
            }
            job
        })
        .collect()
}

/// Apply URLs arrive HTML-entity-escaped, percent-encoded and with a
/// tracking suffix tacked on. Decode entities, drop the suffix, then
/// percent-decode.
pub fn clean_apply_url(url: &str) -> String {
    let mut url = url.replace("&amp;", "&");
    if let Some(idx) = url.find(TRACKING_MARKER) {
        url.truncate(idx);
    }
    percent_decode_str(&url).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn job(id: &str, applicant_count: &str) -> JobPosting {
        JobPosting {
            job_id: id.to_string(),
            run_id: "1".to_string(),
            collection_slug: "remote-jobs".to_string(),
            urn: format!("urn:li:job:{id}"),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            company_link: None,
            location: "Remote".to_string(),
            remote: true,
            salary: "Not specified".to_string(),
            listing_date: "1700000000000".to_string(),
            reposted: false,
            applicant_count: applicant_count.to_string(),
            promoted: false,
            easy_apply: false,
            apply_url: None,
            description: None,
            company_alumni: None,
            school_alumni: None,
            connections: None,
        }
    }

    #[test]
    fn merge_overwrites_only_the_sentinel_fields() {
        let jobs = vec![job("1", "?"), job("2", "50")];
        let mut details = HashMap::new();
        details.insert(
            "1".to_string(),
            JobDetail {
                num_applicants: Some("12".to_string()),
                connections: Some(3),
                ..Default::default()
            },
        );
        let merged = merge_details(jobs, &details);
        assert_eq!(merged[0].applicant_count, "12");
        assert_eq!(merged[0].connections, Some(3));
        assert_eq!(merged[1].applicant_count, "50");
    }

    #[test]
    fn per_job_error_leaves_sentinel() {
        let jobs = vec![job("1", "?")];
        let mut details = HashMap::new();
        details.insert(
            "1".to_string(),
            JobDetail {
                error: Some("not found".to_string()),
                ..Default::default()
            },
        );
        let merged = merge_details(jobs, &details);
        assert_eq!(merged[0].applicant_count, "?");
    }

    #[test]
    fn apply_url_cleanup() {
        let url = "https://jobs.example.com/apply%3Fsrc%3Dfeed&amp;ref=li&trackingId=a1b2c3";
        assert_eq!(
            clean_apply_url(url),
            "https://jobs.example.com/apply?src=feed&ref=li"
        );
    }

    struct FlakyDetailSource {
        failures_left: Mutex<u32>,
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl DetailSource for FlakyDetailSource {
        async fn fetch_details(
            &self,
            job_ids: &[String],
        ) -> Result<HashMap<String, JobDetail>, AppError> {
            *self.calls.lock().unwrap() += 1;
            {
                let mut failures = self.failures_left.lock().unwrap();
                if *failures > 0 {
                    *failures -= 1;
                    return Err(AppError::Internal("503".to_string()));
                }
            }
            Ok(job_ids
                .iter()
                .map(|id| {
                    (
                        id.clone(),
                        JobDetail {
                            num_applicants: Some("7".to_string()),
                            ..Default::default()
                        },
                    )
                })
                .collect())
        }
    }

    fn config(retries: u32) -> PipelineConfig {
        PipelineConfig {
            detail_batch_size: 20,
            detail_concurrency: 4,
            detail_retries: retries,
            retry_base_delay_ms: 1,
            ..PipelineConfig::default()
        }
    }

    #[tokio::test]
    async fn retry_recovers_a_failing_batch() {
        let source = Arc::new(FlakyDetailSource {
            failures_left: Mutex::new(1),
            calls: Mutex::new(0),
        });
        let jobs = vec![job("1", "?")];
        let enriched = enrich_jobs(source.clone(), jobs, &config(1)).await;
        assert_eq!(enriched[0].applicant_count, "7");
        assert_eq!(*source.calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn exhausted_retries_leave_jobs_untouched() {
        let source = Arc::new(FlakyDetailSource {
            failures_left: Mutex::new(5),
            calls: Mutex::new(0),
        });
        let jobs = vec![job("1", "?")];
        let enriched = enrich_jobs(source.clone(), jobs, &config(0)).await;
        assert_eq!(enriched[0].applicant_count, "?");
        assert_eq!(*source.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn jobs_with_known_counts_are_not_requested() {
        let source = Arc::new(FlakyDetailSource {
            failures_left: Mutex::new(0),
            calls: Mutex::new(0),
        });
        let jobs = vec![job("1", "34"), job("2", "<25")];
        let enriched = enrich_jobs(source.clone(), jobs, &config(0)).await;
        assert_eq!(*source.calls.lock().unwrap(), 0);
        assert_eq!(enriched[0].applicant_count, "34");
    }
}
