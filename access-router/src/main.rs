use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use access_router::accessibility::RequirementRegistry;
use access_router::config::ServerConfig;
use access_router::network::load_network;
use access_router::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("access_router=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Fail fast if the network is missing or malformed
    let graph = load_network(&config.network_path)?;

    let registry = RequirementRegistry::standard();
    info!(requirements = ?registry.supported(), "Accessibility requirements");

    let state = AppState::new(graph, registry);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Access router listening");
    info!("API endpoints:");
    info!("  GET  /health            - Health check");
    info!("  GET  /requirements      - Supported accessibility requirements");
    info!("  GET  /stops             - Stops usable under ?requirements=a,b");
    info!("  GET  /stops/:id         - Stop details");
    info!("  GET  /network/summary   - Network statistics");
    info!("  POST /route             - Find an accessible route");
    info!("  POST /outages           - Report an elevator outage or repair");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Access router stopped");
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
