//! Fetches and normalizes all pages of one collection.

use std::collections::HashSet;

use crate::models::job::JobPosting;
use crate::pipeline::PipelineConfig;
use crate::pipeline::normalize::{extract_job_id, normalize_listing};
use crate::source::ListingSource;
use crate::source::raw::RawListing;

/// Fetch up to `max_pages` pages of `collection_slug`, strictly in
/// order, stopping early when a page carries no posting entries.
///
/// Failures never leave this function: a fetch or parse error aborts the
/// remaining pages (the failing page contributes nothing) and whatever
/// earlier pages accumulated is returned. The orchestrator treats a
/// partially-fetched collection the same as a complete one.
pub async fn collect_jobs(
    source: &dyn ListingSource,
    collection_slug: &str,
    run_id: &str,
    config: &PipelineConfig,
) -> Vec<JobPosting> {
    let mut all_jobs: Vec<JobPosting> = Vec::new();
    let mut reposted_ids: HashSet<String> = HashSet::new();

    for page in 0..config.max_pages {
        let start = page * config.page_size;
        let entries = match source.fetch_page(collection_slug, start, config.page_size).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Error fetching jobs from collection {collection_slug} at start={start}: {e}"
                );
                break;
            }
        };

        // An all-filler page signals the end of the collection.
        let has_postings = entries
            .iter()
            .any(|e| e.pre_dash_normalized_job_posting_urn.is_some());
        if !has_postings {
            break;
        }

        match process_page(&entries, collection_slug, run_id, &mut reposted_ids) {
            Ok(mut page_jobs) => all_jobs.append(&mut page_jobs),
            Err(()) => break,
        }
    }

    // Repost status is a second pass over the whole run: an entry
    // flagged on page 3 marks the same job id seen on page 1.
    for job in &mut all_jobs {
        job.reposted = reposted_ids.contains(&job.job_id);
    }

    tracing::info!("Fetched {} jobs from {collection_slug}", all_jobs.len());
    all_jobs
}

/// Normalize one page. Any per-entry failure is logged with the entry's
/// urn and aborts the page; the page's partial output is discarded.
fn process_page(
    entries: &[RawListing],
    collection_slug: &str,
    run_id: &str,
    reposted_ids: &mut HashSet<String>,
) -> Result<Vec<JobPosting>, ()> {
    let mut page_jobs = Vec::new();
    for entry in entries {
        if entry.reposted_job
            && let Ok(job_id) = extract_job_id(&entry.entity_urn)
        {
            reposted_ids.insert(job_id);
        }
        match normalize_listing(entry, collection_slug, run_id) {
            Ok(Some(job)) => page_jobs.push(job),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(
                    "Error with job posting in {collection_slug} (urn {}): {e}",
                    entry.entity_urn
                );
                return Err(());
            }
        }
    }
    Ok(page_jobs)
}
