//! # parley_core
//!
//! Core chat gateway logic for Parley.
//!
//! - [`config::ProviderConfig`] — upstream provider settings
//! - [`gateway::ChatGateway`] — validate, forward, normalize
//! - [`provider::ChatTransport`] — the network seam, with
//!   [`provider::openai::OpenAiTransport`] as the production implementation

pub mod config;
pub mod gateway;
pub mod provider;

pub use config::{ConfigError, ProviderConfig};
pub use gateway::{ChatError, ChatGateway, ChatReply, ChatRequest, ErrorKind};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
