use std::sync::Arc;

use anyhow::Result;
use shared::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting stock dashboard API server...");

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(&config)?);
    info!(source = %config.stooq_base_url, watchlist = ?config.watchlist, "Data source configured");

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("API server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
