pub mod handlers;
pub mod routes;
pub mod state;
pub mod static_files;
pub mod templates;

use crate::config::WebConfig;
use state::AppState;
use std::sync::Arc;
use tracing::{error, info};

pub async fn run_server(config: WebConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
