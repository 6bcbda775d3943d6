//! Chat gateway — validates a user message, forwards it to the upstream
//! provider behind a fixed system prompt and normalizes the outcome.
//!
//! Every failure is returned as a [`ChatError`]; nothing escapes as a panic.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::provider::{ChatTransport, CompletionRequest, Message, TransportError};

/// Maximum message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Greeting sent by [`ChatGateway::check`].
pub const CHECK_GREETING: &str = "Say hello from the chat gateway!";

/// Incoming chat call. `message` is optional so absence surfaces as a
/// validation failure instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Reply text extracted from the first upstream choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}

/// Failure classes of [`ChatGateway::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed local checks; the provider was not called.
    Validation,
    /// Provider answered but the payload was unusable.
    UpstreamResponse,
    /// Network failure, timeout or non-2xx status from the provider.
    UpstreamTransport,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::UpstreamResponse => "upstream_response_error",
            ErrorKind::UpstreamTransport => "upstream_transport_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized gateway failure.
///
/// `message` is safe to show to callers. The underlying transport failure,
/// if any, is kept in `cause` for logging and status mapping.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct ChatError {
    pub kind: ErrorKind,
    pub message: String,
    #[source]
    pub cause: Option<TransportError>,
}

impl ChatError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            cause: None,
        }
    }

    fn upstream_response(cause: Option<TransportError>) -> Self {
        Self {
            kind: ErrorKind::UpstreamResponse,
            message: "Upstream provider returned an unusable response".into(),
            cause,
        }
    }

    fn upstream_transport(cause: TransportError) -> Self {
        let message = match cause {
            TransportError::Timeout => "Upstream provider timed out",
            _ => "Upstream provider request failed",
        };
        Self {
            kind: ErrorKind::UpstreamTransport,
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// True when the upstream call hit the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self.cause, Some(TransportError::Timeout))
    }
}

impl From<TransportError> for ChatError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Decode(_) => ChatError::upstream_response(Some(e)),
            TransportError::Timeout
            | TransportError::Network(_)
            | TransportError::Status { .. } => ChatError::upstream_transport(e),
        }
    }
}

/// Checks the message and returns it untouched on success.
pub fn validate(request: ChatRequest) -> Result<String, ChatError> {
    let message = request
        .message
        .ok_or_else(|| ChatError::validation("The message field is required."))?;

    if message.trim().is_empty() {
        return Err(ChatError::validation("The message field must not be empty."));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ChatError::validation(format!(
            "The message field must not be greater than {MAX_MESSAGE_CHARS} characters."
        )));
    }

    Ok(message)
}

/// Stateless front to the upstream provider. Cheap to share behind `Arc`.
pub struct ChatGateway {
    config: ProviderConfig,
    transport: Arc<dyn ChatTransport>,
}

impl ChatGateway {
    pub fn new(config: ProviderConfig, transport: Arc<dyn ChatTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Builds the two-message conversation for a validated message.
    pub fn compose(&self, message: String) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(self.config.system_prompt.clone()),
                Message::user(message),
            ],
        }
    }

    /// Validates, calls the provider once and extracts the first reply.
    pub async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let message = validate(request)?;
        let chars = message.chars().count();
        let upstream = self.compose(message);

        debug!(model = %upstream.model, chars, "forwarding chat message");

        let response = self
            .transport
            .create_chat_completion(&upstream)
            .await
            .map_err(|e| {
                warn!(error = %e, "upstream chat completion failed");
                ChatError::from(e)
            })?;

        match response.first_content() {
            Some(text) => Ok(ChatReply {
                text: text.to_string(),
            }),
            None => {
                warn!(
                    choices = response.choices.len(),
                    "upstream response carried no reply content"
                );
                Err(ChatError::upstream_response(None))
            }
        }
    }

    /// Round-trips a fixed greeting to confirm the provider is reachable.
    pub async fn check(&self) -> Result<ChatReply, ChatError> {
        self.complete(ChatRequest::new(CHECK_GREETING)).await
    }
}
