pub mod feedback;
pub mod filters;
pub mod jobs;
pub mod session;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use sqlx::SqlitePool;

use crate::pipeline::JobPipeline;
use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub pipeline: Arc<JobPipeline>,
    pub session: Arc<Session>,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Jobs
        .route("/jobs", get(jobs::saved))
        .route("/jobs/refresh", post(jobs::refresh))
        .route("/jobs/query", post(jobs::query))
        .route("/jobs/{job_id}/viewed", post(jobs::mark_viewed))
        // Persisted filter options
        .route("/filters", get(filters::get).put(filters::update))
        // Session token pass-through
        .route(
            "/session/token",
            get(session::status).put(session::update),
        )
        // Feedback
        .route("/feedback", post(feedback::submit))
        .with_state(state);

    Router::new().nest("/api/v1", api)
}
