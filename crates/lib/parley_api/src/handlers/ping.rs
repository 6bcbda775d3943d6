//! Liveness probe.

use axum::Json;

use crate::models::PingResponse;

/// `GET /ping` — always answers, independent of the upstream provider.
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}
