use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::setting::{SESSION_TOKEN_KEY, Setting};
use crate::routes::api::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenUpdate {
    pub token: String,
}

/// PUT /api/v1/session/token
///
/// Stores the upstream CSRF token captured by the browser side. Opaque
/// pass-through: no validation, no refresh.
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<TokenUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    if input.token.is_empty() {
        return Err(AppError::BadRequest("Empty token".to_string()));
    }
    Setting::set(&state.pool, SESSION_TOKEN_KEY, &input.token).await?;
    state.session.set_token(input.token).await;
    tracing::info!("Session token updated");
    Ok(Json(serde_json::json!({ "updated": true })))
}

/// GET /api/v1/session/token. Reports presence only, never the token
/// itself.
pub async fn status(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(
        serde_json::json!({ "present": state.session.has_token().await }),
    ))
}
