//! JSON bodies returned by the API.

use serde::Serialize;

/// `POST /chat` success body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// `GET /ping` body.
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub message: String,
}

/// `GET /check-openai` success body.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    pub status: String,
    pub reply: String,
}

/// Error envelope shared by every route.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    pub message: String,
}
