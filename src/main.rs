//! E-signature Session Backend
//!
//! Creates agreements from a template through the Adobe Sign REST API,
//! hands back a hosted signing URL and lets the browser poll for completion.

use esign_session_backend::api;
use esign_session_backend::config::Config;
use esign_session_backend::provider::AdobeSignClient;
use esign_session_backend::state::AppState;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(dotenv_loaded, "Configuration loaded: {:?}", config);

    // One pooled HTTP client for all provider calls
    let http = reqwest::Client::new();
    let provider = AdobeSignClient::new(http, &config.provider);
    let app_state = AppState::new(Arc::new(provider), config.settle);

    let app = api::router(app_state, Path::new(&config.public_dir));

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("Server running on {}", config.provider.public_base_url);
    info!("Listening on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM so in-flight signing sessions can finish
///
/// A signal handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "ctrl_c",
        _ = terminate => "sigterm",
    };
    info!(signal, "Stopping; in-flight signing sessions will finish first");
}
