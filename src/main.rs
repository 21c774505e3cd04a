//! MCP gateway binary.
//!
//! Validates configuration, then serves the dispatch, manifest, and health
//! routes over HTTP.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trello_mcp::server::{build_router, AppState};
use trello_mcp::{Config, TrelloClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("trello_mcp=info".parse()?))
        .init();

    info!("Starting MCP gateway...");

    // Required secrets abort startup before the listener binds
    let config = Config::from_env().context("Configuration validation failed")?;

    let trello = TrelloClient::new(&config)?;

    let state = AppState {
        config: config.clone(),
        trello,
    };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(port = config.port, "MCP gateway listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
