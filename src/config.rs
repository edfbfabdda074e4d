use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "earlybird", about = "Job feed aggregation service")]
pub struct Config {
    /// Database connection URL
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://earlybird.db?mode=rwc"
    )]
    pub database_url: String,

    /// Run database migrations on startup
    #[arg(long, env = "RUN_MIGRATIONS", default_value = "true")]
    pub run_migrations: bool,

    /// Listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Base URL of the remote listing API
    #[arg(
        long,
        env = "LISTING_BASE_URL",
        default_value = "https://www.linkedin.com/voyager/api"
    )]
    pub listing_base_url: String,

    /// URL of the bulk job-detail endpoint
    #[arg(
        long,
        env = "DETAIL_API_URL",
        default_value = "https://api.earlybird.dev/api/jobdetails-bulk"
    )]
    pub detail_api_url: String,

    /// Jobs requested per listing page
    #[arg(long, env = "PAGE_SIZE", default_value = "50")]
    pub page_size: u32,

    /// Maximum pages fetched per collection
    #[arg(long, env = "MAX_PAGES", default_value = "4")]
    pub max_pages: u32,

    /// Maximum collection aggregations in flight at once
    #[arg(long, env = "COLLECTION_CONCURRENCY", default_value = "16")]
    pub collection_concurrency: usize,

    /// Jobs per bulk detail request
    #[arg(long, env = "DETAIL_BATCH_SIZE", default_value = "20")]
    pub detail_batch_size: usize,

    /// Maximum detail batches in flight at once
    #[arg(long, env = "DETAIL_CONCURRENCY", default_value = "8")]
    pub detail_concurrency: usize,

    /// Retries per failed detail batch (0 disables retrying)
    #[arg(long, env = "DETAIL_RETRIES", default_value = "0")]
    pub detail_retries: u32,

    /// Base delay in milliseconds for detail-batch retry backoff
    #[arg(long, env = "RETRY_BASE_DELAY_MS", default_value = "1000")]
    pub retry_base_delay_ms: u64,
}
