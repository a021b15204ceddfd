//! Server entry-point: loads configuration, seeds the in-memory store and
//! serves the HTTP API.

use std::env;
use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use timesheet_engine::admin::Administration;
use timesheet_engine::api::{AppState, create_router};
use timesheet_engine::config::ConfigLoader;
use timesheet_engine::session::MemoryIdentityProvider;
use timesheet_engine::store::MemoryStore;

const DEFAULT_CONFIG_DIR: &str = "./config";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config_dir = env::var("TIMESHEET_CONFIG_DIR")
        .ok()
        .or_else(|| env::args().nth(1))
        .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());

    let config = ConfigLoader::load(&config_dir).map_err(|e| {
        error!(path = %config_dir, error = %e, "failed to load configuration");
        std::io::Error::other(e.to_string())
    })?;

    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let identity = Arc::new(MemoryIdentityProvider::with_clock(clock.clone()));

    Administration::new(Arc::clone(&store), identity, clock.clone())
        .seed(&config)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let bind_address = config.bind_address().to_string();
    let app = create_router(AppState::new(config, store, clock));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Timesheet engine listening");
    axum::serve(listener, app).await
}
