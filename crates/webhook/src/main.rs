use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use webhook::{build_router, AppConfig, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let providers: Vec<_> = state
        .router
        .orchestrator()
        .specs()
        .map(|spec| spec.id.clone())
        .collect();
    info!("Provider order: {}", providers.join(" → "));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!(addr = %config.bind_addr, "LINE relay listening");

    if let Err(e) = axum::serve(listener, build_router(state)).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
