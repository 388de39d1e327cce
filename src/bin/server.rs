//! Roster server: reads config from the environment, opens the configured store
//! (creating the database and tables for PostgreSQL) and serves the API.

use roster::{app, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roster=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::connect(&config).await?;
    let app = app(state, &config);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        prefix = %config.api_prefix,
        store = ?config.store,
        "listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;
    Ok(())
}
