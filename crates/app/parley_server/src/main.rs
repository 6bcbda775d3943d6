//! Parley chat gateway server binary.
//!
//! Reads provider settings from flags or the environment (a `.env` file is
//! honoured), then serves the API until Ctrl-C or SIGTERM.

use std::sync::Arc;

use clap::Parser;
use parley_core::provider::openai::OpenAiTransport;
use parley_core::{ChatGateway, ConfigError, ProviderConfig};
use tracing::info;

/// Address the API binds to when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// CLI arguments for the gateway server.
///
/// Provider flags are passed through [`ProviderConfig::from_lookup`], so a
/// blank value (e.g. `OPENAI_MODEL=` in `.env`) falls back to the default.
#[derive(Parser, Debug)]
#[command(name = "parley_server", version, about = "Parley chat gateway server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// Upstream API key (required).
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier sent upstream [default: gpt-4o-mini].
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// System message prepended to every conversation
    /// [default: "You are a helpful AI assistant."].
    #[arg(long, env = "CHAT_SYSTEM_PROMPT")]
    system_prompt: Option<String>,

    /// Base URL of the OpenAI-compatible API [default: https://api.openai.com/v1].
    #[arg(long, env = "OPENAI_BASE_URL")]
    base_url: Option<String>,

    /// Upstream call timeout in seconds [default: 30].
    #[arg(long, env = "OPENAI_TIMEOUT_SECS")]
    timeout_secs: Option<String>,
}

impl Args {
    fn provider_config(&self) -> Result<ProviderConfig, ConfigError> {
        ProviderConfig::from_lookup(|key| {
            let value = match key {
                "OPENAI_API_KEY" => &self.api_key,
                "OPENAI_MODEL" => &self.model,
                "CHAT_SYSTEM_PROMPT" => &self.system_prompt,
                "OPENAI_BASE_URL" => &self.base_url,
                "OPENAI_TIMEOUT_SECS" => &self.timeout_secs,
                _ => return None,
            };
            value.clone()
        })
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
                tracing_subscriber::EnvFilter::try_new("info,parley_api=debug,parley_core=debug")
            })?,
        )
        .init();

    let args = Args::parse();
    let provider = args.provider_config()?;

    info!(
        model = %provider.model,
        base_url = %provider.base_url,
        timeout_secs = provider.timeout.as_secs(),
        "starting parley_server"
    );

    let transport = Arc::new(OpenAiTransport::new(&provider)?);
    let state = parley_api::AppState {
        gateway: Arc::new(ChatGateway::new(provider, transport)),
    };

    let app = parley_api::router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}
