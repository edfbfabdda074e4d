use axum::Json;
use axum::extract::State;

use crate::error::AppError;
use crate::models::feedback::{CreateFeedback, Feedback};
use crate::routes::api::AppState;

/// POST /api/v1/feedback
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateFeedback>,
) -> Result<Json<serde_json::Value>, AppError> {
    let feedback = Feedback::create(&state.pool, input).await?;
    tracing::info!(
        "Received feedback {} ({}): {}",
        feedback.id,
        feedback.kind,
        feedback.subject
    );
    Ok(Json(serde_json::json!({ "success": true })))
}
