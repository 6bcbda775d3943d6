//! Shared helpers for router integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use parley_api::AppState;
use parley_core::provider::{ChatTransport, CompletionRequest, CompletionResponse, TransportError};
use parley_core::{ChatGateway, ProviderConfig};

/// In-memory transport that replays a fixed outcome and counts calls.
pub struct MockTransport {
    outcome: Result<CompletionResponse, TransportError>,
    calls: AtomicUsize,
    last: Mutex<Option<CompletionRequest>>,
}

impl MockTransport {
    pub fn replying(content: &str) -> Arc<Self> {
        Self::with_outcome(Ok(CompletionResponse::with_content(content)))
    }

    pub fn failing(error: TransportError) -> Arc<Self> {
        Self::with_outcome(Err(error))
    }

    pub fn with_outcome(outcome: Result<CompletionResponse, TransportError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn create_chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());
        self.outcome.clone()
    }
}

pub fn app(transport: Arc<MockTransport>) -> Router {
    let state = AppState {
        gateway: Arc::new(ChatGateway::new(ProviderConfig::new("sk-test"), transport)),
    };
    parley_api::router(state)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(resp: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("parse JSON")
}
