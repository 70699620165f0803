//! shootboard-server entry point

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use shootboard_server::config::ServerConfig;
use shootboard_server::repository::init_db;
use shootboard_server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!(
        "Starting shootboard-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let db = init_db(&config.database)
        .with_context(|| format!("failed to open database {}", config.database.display()))?;
    let app = build_router(AppState::new(db, config.password.clone()));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
