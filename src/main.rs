use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use clap::Parser;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use earlybird::config::Config;
use earlybird::db;
use earlybird::models::setting::{SESSION_TOKEN_KEY, Setting};
use earlybird::pipeline::{JobPipeline, PipelineConfig};
use earlybird::routes::api::{self, AppState};
use earlybird::session::Session;
use earlybird::source::details::BulkDetailClient;
use earlybird::source::voyager::VoyagerListingClient;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn readyz(pool: SqlitePool) -> impl IntoResponse {
    let result: Result<(i32,), _> = sqlx::query_as("SELECT 1").fetch_one(&pool).await;
    match result {
        Ok(_) => (StatusCode::OK, "ready"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("earlybird=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        db::run_migrations(&pool).await?;
        tracing::info!("Migrations complete");
    }

    // Session outlives individual refresh runs; the saved token (if any)
    // seeds it so a restart doesn't require re-capturing.
    let saved_token = Setting::get(&pool, SESSION_TOKEN_KEY).await?;
    let session = Arc::new(Session::new(saved_token));

    let listing = VoyagerListingClient::new(config.listing_base_url.clone(), Arc::clone(&session))?;
    let detail = BulkDetailClient::new(config.detail_api_url.clone())?;
    let pipeline = Arc::new(JobPipeline::new(
        Arc::new(listing),
        Arc::new(detail),
        PipelineConfig::from_config(&config),
    ));

    let state = AppState {
        pool: pool.clone(),
        pipeline,
        session,
    };

    let readyz_pool = pool.clone();
    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(move || readyz(readyz_pool.clone())))
        .merge(api::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
