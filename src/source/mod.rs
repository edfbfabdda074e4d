// Remote source contracts. The pipeline only sees these traits; the
// reqwest-backed implementations live in voyager.rs / details.rs and
// tests substitute in-process fakes.

pub mod details;
pub mod raw;
pub mod voyager;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppError;
use crate::source::raw::{JobDetail, RawListing};

/// One paginated query against the remote listings API for one named
/// collection. Non-2xx responses surface as errors.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_page(
        &self,
        collection_slug: &str,
        start: u32,
        count: u32,
    ) -> Result<Vec<RawListing>, AppError>;
}

/// Bulk per-job detail lookup keyed by job id.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn fetch_details(
        &self,
        job_ids: &[String],
    ) -> Result<HashMap<String, JobDetail>, AppError>;
}
