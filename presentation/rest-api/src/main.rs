use dotenvy::dotenv;

mod api;
mod config;
mod setup;

use config::{app_config::AppConfig, storage_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Opens the configured product store, wires the catalog use cases and serves
/// them over HTTP.
/// - config/: server, CORS and storage selection
/// - setup/: dependency injection and server setup
/// - api/: route handlers and DTOs
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Open the store
    let storage = storage_config::init_storage(&config.storage).await?;

    // 5. Wire dependencies
    let container = DependencyContainer::new(storage.repository(), config.storage.name());

    // 6. Run server, then release the store whatever the outcome
    let result = Server::run(config, container).await;
    storage.shutdown().await;

    result
}
