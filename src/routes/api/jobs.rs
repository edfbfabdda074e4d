use std::collections::HashSet;

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppError;
use crate::feed::sort::{SortDirection, SortKey, sort_jobs};
use crate::feed::{FilterOptions, filter_jobs};
use crate::models::job::JobPosting;
use crate::models::snapshot::Snapshot;
use crate::models::viewed::ViewedJob;
use crate::routes::api::AppState;

/// POST /api/v1/jobs/refresh
///
/// Runs the full aggregation pipeline. Internal causes are logged; the
/// caller only sees a generic failure.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    let outcome = state.pipeline.refresh(&state.pool).await.map_err(|e| {
        tracing::error!("Error fetching jobs from all collections: {e}");
        AppError::Internal("Failed to fetch jobs".to_string())
    })?;
    tracing::info!(
        "Refresh run {} produced {} jobs",
        outcome.run_id,
        outcome.jobs.len()
    );

    Ok(Json(Snapshot {
        jobs: outcome.jobs,
        keyword_counts: outcome.keyword_counts,
        viewed_jobs: ViewedJob::list(&state.pool).await?,
    }))
}

/// GET /api/v1/jobs. Returns the last persisted snapshot, no re-fetch.
pub async fn saved(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(Snapshot::load(&state.pool).await?))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub filter_options: FilterOptions,
    pub hidden_job_ids: Vec<String>,
    pub sort_by: SortKey,
    pub direction: SortDirection,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            filter_options: FilterOptions::default(),
            hidden_job_ids: Vec::new(),
            sort_by: SortKey::ListingDate,
            direction: SortDirection::Desc,
        }
    }
}

/// POST /api/v1/jobs/query
///
/// Applies the feed engine (filter + sort) over the persisted snapshot.
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let jobs = JobPosting::list(&state.pool).await?;
    let viewed: HashSet<String> = ViewedJob::list(&state.pool)
        .await?
        .into_iter()
        .map(|v| v.job_id)
        .collect();
    let hidden: HashSet<String> = request.hidden_job_ids.iter().cloned().collect();

    let mut filtered = filter_jobs(&jobs, &request.filter_options, &hidden, &viewed);
    sort_jobs(
        &mut filtered,
        request.sort_by,
        request.direction,
        Utc::now().timestamp_millis(),
    );
    Ok(Json(filtered))
}

/// POST /api/v1/jobs/{job_id}/viewed
pub async fn mark_viewed(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    ViewedJob::mark(&state.pool, &job_id).await?;
    Ok(Json(serde_json::json!({ "viewed": true })))
}
