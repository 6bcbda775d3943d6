//! # parley_api
//!
//! HTTP API library for Parley.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use parley_core::ChatGateway;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{chat, check, ping};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the upstream chat-completion provider.
    pub gateway: Arc<ChatGateway>,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_PING, get(ping::ping_handler))
        .route(routes::POST_CHAT, post(chat::chat_handler))
        .route(routes::GET_CHECK_OPENAI, get(check::check_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
