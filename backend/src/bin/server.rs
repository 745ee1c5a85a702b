//! Creator analytics HTTP server binary.
//!
//! Loads the configuration, builds the record source and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! # In-memory record source (default)
//! cargo run --bin creator-analytics-server
//!
//! # Records read from a JSON file
//! RECORDS_FILE=data/records.json cargo run --bin creator-analytics-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `ANALYTICS_CONFIG`: Path of the TOML configuration file
//! - `REPOSITORY_TYPE`: `local` or `file`, overriding the configuration
//! - `RECORDS_FILE`: JSON records file for the `file` source
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use creator_analytics::config::AnalyticsConfig;
use creator_analytics::db::RepositoryFactory;
use creator_analytics::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting creator analytics server");

    let config = AnalyticsConfig::load()?;
    let repository = RepositoryFactory::from_config(&config)?;
    info!(
        "Record source initialized ({})",
        config.repository.repo_type
    );

    let state = AppState::new(repository, config);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
