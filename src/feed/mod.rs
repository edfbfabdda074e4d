//! Pure filter/sort/ranking engine over an in-memory job snapshot.
//! Re-run by the presentation layer on every state change; nothing here
//! touches the network or the store.

pub mod score;
pub mod sort;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;

/// User-editable filter state. Persisted independently of snapshots;
/// lists have set semantics for membership tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub include_keywords: Vec<String>,
    pub exclude_keywords: Vec<String>,
    pub companies: Vec<String>,
    pub locations: Vec<String>,
    pub exclude_promoted: bool,
    pub exclude_viewed: bool,
    pub show_reposted: bool,
    pub show_easy_apply: bool,
    pub show_external: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            include_keywords: Vec::new(),
            exclude_keywords: Vec::new(),
            companies: Vec::new(),
            locations: Vec::new(),
            exclude_promoted: false,
            exclude_viewed: false,
            show_reposted: false,
            show_easy_apply: true,
            show_external: true,
        }
    }
}

fn matches_keyword(job: &JobPosting, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    job.title.to_lowercase().contains(&keyword)
        || job.company.to_lowercase().contains(&keyword)
        || job
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(&keyword))
}

/// The filter predicate: a job survives iff every clause holds.
///
/// `show_reposted` restricts the feed to reposted jobs only. That is
/// the shipped behavior, kept literally despite the permissive-sounding
/// name.
pub fn job_matches(
    job: &JobPosting,
    options: &FilterOptions,
    hidden_job_ids: &HashSet<String>,
    viewed_job_ids: &HashSet<String>,
) -> bool {
    if hidden_job_ids.contains(&job.job_id) {
        return false;
    }
    if options.exclude_viewed && viewed_job_ids.contains(&job.job_id) {
        return false;
    }
    if options.exclude_promoted && job.promoted {
        return false;
    }
    if options.show_reposted && !job.reposted {
        return false;
    }

    let matches_apply_method = (job.easy_apply && options.show_easy_apply)
        || (!job.easy_apply && options.show_external);
    if !matches_apply_method {
        return false;
    }

    if !options.include_keywords.is_empty()
        && !options
            .include_keywords
            .iter()
            .any(|k| matches_keyword(job, k))
    {
        return false;
    }
    if options.exclude_keywords.iter().any(|k| matches_keyword(job, k)) {
        return false;
    }

    if !options.companies.is_empty() && !options.companies.contains(&job.company) {
        return false;
    }
    if !options.locations.is_empty() {
        let matches_location = options.locations.contains(&job.location)
            || (options.locations.iter().any(|l| l == "Remote") && job.remote);
        if !matches_location {
            return false;
        }
    }

    true
}

pub fn filter_jobs(
    jobs: &[JobPosting],
    options: &FilterOptions,
    hidden_job_ids: &HashSet<String>,
    viewed_job_ids: &HashSet<String>,
) -> Vec<JobPosting> {
    jobs.iter()
        .filter(|job| job_matches(job, options, hidden_job_ids, viewed_job_ids))
        .cloned()
        .collect()
}
