use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::session::Session;
use crate::source::ListingSource;
use crate::source::raw::{ListingEnvelope, RawListing};

const QUERY_ID: &str = "voyagerJobsDashJobCards.a18f4e75c4ec13a6acae19909e362b3b";
const QUERY_ORIGIN: &str = "GENERIC_JOB_COLLECTIONS_LANDING";

/// Listing client for the job-collections graphql endpoint. The endpoint
/// rejects clients that don't look like the site's own web frontend, so
/// the headers mirror a desktop browser session.
pub struct VoyagerListingClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl VoyagerListingClient {
    pub fn new(base_url: String, session: Arc<Session>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36")
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url,
            session,
        })
    }
}

#[async_trait]
impl ListingSource for VoyagerListingClient {
    async fn fetch_page(
        &self,
        collection_slug: &str,
        start: u32,
        count: u32,
    ) -> Result<Vec<RawListing>, AppError> {
        // Token acquisition lives upstream; a stale or missing token is
        // passed through and fails as a non-2xx response.
        let token = self.session.token().await.unwrap_or_default();

        let url = format!(
            "{}/graphql?variables=(count:{count},jobCollectionSlug:{collection_slug},query:(origin:{QUERY_ORIGIN}),start:{start})&queryId={QUERY_ID}",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .header("accept", "application/vnd.linkedin.normalized+json+2.1")
            .header("accept-language", "en-US,en;q=0.9")
            .header("csrf-token", token)
            .header("sec-fetch-dest", "empty")
            .header("sec-fetch-mode", "cors")
            .header("sec-fetch-site", "same-origin")
            .header("x-li-lang", "en_US")
            .header("x-restli-protocol-version", "2.0.0")
            .send()
            .await?
            .error_for_status()?;

        let envelope: ListingEnvelope = response.json().await?;
        Ok(envelope.included)
    }
}
