use axum::Json;
use axum::extract::State;

use crate::error::AppError;
use crate::feed::FilterOptions;
use crate::models::setting::{FILTER_OPTIONS_KEY, Setting};
use crate::routes::api::AppState;

/// GET /api/v1/filters. Returns saved filter options, defaults when unset.
pub async fn get(State(state): State<AppState>) -> Result<Json<FilterOptions>, AppError> {
    let options = match Setting::get(&state.pool, FILTER_OPTIONS_KEY).await? {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| AppError::Internal(format!("Corrupt saved filter options: {e}")))?,
        None => FilterOptions::default(),
    };
    Ok(Json(options))
}

/// PUT /api/v1/filters
pub async fn update(
    State(state): State<AppState>,
    Json(options): Json<FilterOptions>,
) -> Result<Json<serde_json::Value>, AppError> {
    let json = serde_json::to_string(&options)
        .map_err(|e| AppError::Internal(format!("Failed to serialize filter options: {e}")))?;
    Setting::set(&state.pool, FILTER_OPTIONS_KEY, &json).await?;
    Ok(Json(serde_json::json!({ "saved": true })))
}
