//! HTTP server for the childminder statistics engine.

use assmat_engine::api::{AppState, create_router};
use assmat_engine::config::ServerConfig;
use assmat_engine::storage::JsonStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "assmat_engine=info,assmat_server=info,tower_http=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env()?;
    info!(data_dir = %config.data_dir.display(), "Opening data store");
    let state = AppState::new(JsonStore::new(config.data_dir.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
