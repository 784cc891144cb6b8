//! Startup helpers for the DSCPL guide server.

use std::process::ExitCode;
use std::sync::Arc;

use crate::guide::core::config::AssistantConfig;
use crate::guide::engine::context::AssistantContext;
use crate::server::{self, AppState};

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "DSCPL_PORT";

/// Run the server (used by the `dscpl-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting DSCPL guide v{}", env!("CARGO_PKG_VERSION"));

    let config = match AssistantConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::from(1);
        }
    };
    tracing::info!("Corpus: {}", config.corpus.path.display());

    let port = get_port();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let state = match rt.block_on(initialize(config)) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize guide: {e}");
            return ExitCode::from(1);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown requested");
    };

    if let Err(e) = rt.block_on(server::run_server_with_shutdown(state, port, shutdown)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Build the context and application state without starting the server.
///
/// # Errors
/// Returns an error if the credential is missing, the configuration is
/// invalid, or the corpus cannot be indexed.
pub async fn initialize(
    config: AssistantConfig,
) -> Result<Arc<AppState>, Box<dyn std::error::Error + Send + Sync>> {
    let context = AssistantContext::from_config(config).await?;
    Ok(AppState::new(context))
}

/// Get configured server port.
#[must_use]
pub fn get_port() -> u16 {
    std::env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}
