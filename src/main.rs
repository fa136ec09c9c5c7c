//! Figures Server
//!
//! HTTP service that accepts a PDF source (local path, directory, or URL),
//! runs the external pdffigures2 tool against it, and returns the generated
//! figures and reduced metadata as JSON.

use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use figures_server::config::Config;
use figures_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "figures_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Figures Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Output root: {}", config.output.root.display());
    tracing::info!("pdffigures2 jar: {}", config.tool.jar_path.display());

    let host = config.server.host;
    let port = config.server.port;

    // Create application state (also creates the output tree)
    let state = AppState::new(config)?;
    let app = figures_server::app(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from((host, port));
    tracing::info!("Figures Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
