//! Seller API service entry point.

use tokio::net::TcpListener;
use tracing::info;

use seller_api::telemetry::init_tracing;
use seller_api::{create_router, AppState, Config, Dependencies, ServiceError};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    info!(bind_addr = %config.bind_addr, "Starting seller API");

    let deps = Dependencies::new(&config).await?;
    let app = create_router(AppState::new(deps.gateway));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(bind_addr = %config.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Seller API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
