use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

mod classifier;
mod config;
mod generator;
mod util;
mod web;

use crate::config::{AppConfig, CliArgs};
use crate::generator::GeneratorManager;
use crate::util::logging::init_tracing;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration; logging settings live in it, so this comes first
    let config = AppConfig::new(&args)?;

    // Initialize logging
    init_tracing(&config.logging);

    // Initialize SQL generator
    info!("Initializing SQL generator with backend: {}", config.generator.backend);
    let generator = GeneratorManager::new(&config.generator)?;

    let web_config = config.web.clone();
    let app_state = Arc::new(AppState::new(config, generator)?);

    // Start the web server
    info!("Starting NL-Query server on {}:{}", web_config.host, web_config.port);
    match web::run_server(web_config, app_state).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            error!("Server error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
