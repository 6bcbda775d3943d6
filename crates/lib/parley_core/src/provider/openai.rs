//! OpenAI-compatible chat-completion transport.
//!
//! Calls `{base_url}/chat/completions` once per request, with bearer auth and
//! a client-wide timeout. No retries.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::debug;
use url::Url;

use super::{ChatTransport, CompletionRequest, CompletionResponse, TransportError};
use crate::config::{ConfigError, ProviderConfig};

/// Upstream error bodies are cut to this many characters before being kept.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// [`ChatTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct OpenAiTransport {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl OpenAiTransport {
    /// Builds the HTTP client once from the provider configuration.
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let endpoint = completions_endpoint(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "OPENAI_TIMEOUT_SECS",
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL of the chat-completions endpoint this transport posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn completions_endpoint(base_url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "OPENAI_BASE_URL",
        reason,
    };

    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{trimmed}/chat/completions"))
        .map_err(|e| invalid(format!("{e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme: {}", url.scheme())));
    }
    Ok(url)
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl ChatTransport for OpenAiTransport {
    async fn create_chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, TransportError> {
        debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        let bytes = resp.bytes().await.map_err(classify)?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_completions_path() {
        let url = completions_endpoint("https://api.openai.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");

        let url = completions_endpoint("http://localhost:8080/v1/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn endpoint_rejects_garbage_and_odd_schemes() {
        assert!(matches!(
            completions_endpoint("not a url"),
            Err(ConfigError::Invalid { key: "OPENAI_BASE_URL", .. })
        ));
        assert!(matches!(
            completions_endpoint("ftp://example.com"),
            Err(ConfigError::Invalid { key: "OPENAI_BASE_URL", .. })
        ));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "é".repeat(MAX_ERROR_BODY_CHARS + 10);
        let cut = truncate(&body);
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(cut.ends_with('…'));

        assert_eq!(truncate("short"), "short");
    }
}
