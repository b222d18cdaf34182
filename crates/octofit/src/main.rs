use std::sync::Arc;

use octofit::{
    config::ServerConfig, database::Database, memory::MemoryStore, run_server,
    store::SharedStore,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let config = ServerConfig::from_env();

    let store: SharedStore = if config.memory_store {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("Connecting to database at {}", config.database_url);
        Arc::new(Database::connect(&config.database_url).await?)
    };

    run_server(store, config.port).await
}
