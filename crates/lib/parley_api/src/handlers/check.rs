//! Upstream diagnostic endpoint.

use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::models::CheckResponse;

/// `GET /check-openai` — sends a fixed greeting through the gateway.
pub async fn check_handler(State(state): State<AppState>) -> AppResult<Json<CheckResponse>> {
    let reply = state.gateway.check().await?;
    info!(model = %state.gateway.config().model, "upstream provider check succeeded");

    Ok(Json(CheckResponse {
        status: "success".to_string(),
        reply: reply.text,
    }))
}
