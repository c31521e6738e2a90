use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_planner::network::Network;
use metro_planner::planner::{Planner, PlannerConfig};
use metro_planner::web::{AppState, ServerConfig, ServerError, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;

    let network = Network::from_path(&config.network_path)?;
    let planner = Planner::new(Arc::new(network), PlannerConfig::default());

    // Build app state
    let state = AppState::new(planner);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Metro planner listening");
    info!("API endpoints: GET /health, /api/lines, /api/stations, /api/routes?from=&to=");

    axum::serve(listener, app).await?;
    Ok(())
}
