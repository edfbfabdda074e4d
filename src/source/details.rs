use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;

use crate::error::AppError;
use crate::source::DetailSource;
use crate::source::raw::JobDetail;

/// Client for the bulk job-detail endpoint: one POST per batch of job
/// ids, returning a per-id detail map.
pub struct BulkDetailClient {
    client: reqwest::Client,
    url: String,
}

impl BulkDetailClient {
    pub fn new(url: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl DetailSource for BulkDetailClient {
    async fn fetch_details(
        &self,
        job_ids: &[String],
    ) -> Result<HashMap<String, JobDetail>, AppError> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "jobIds": job_ids }))
            .send()
            .await?
            .error_for_status()?;

        let details: HashMap<String, JobDetail> = response.json().await?;
        Ok(details)
    }
}
