//! Chat endpoint — forwards one message to the upstream provider.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use parley_core::ChatRequest;

use crate::AppState;
use crate::error::AppResult;
use crate::models::ChatResponse;

/// `POST /chat` — validate `{"message": ...}` and return the model's reply.
///
/// Body decoding failures (malformed JSON, `message` not a string) are
/// reported as validation errors.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(request) = payload?;
    let reply = state.gateway.complete(request).await?;

    Ok(Json(ChatResponse { reply: reply.text }))
}
