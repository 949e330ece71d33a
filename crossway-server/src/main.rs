//! Street intersection routing HTTP service
//!
//! Builds the road graph once at startup from a GeoJSON roads file, then
//! serves read-only resolve / intersection / route queries against it.

mod config;
mod handlers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crossway_core::{build_road_graph, records_from_geojson};

use crate::config::ServerConfig;
use crate::handlers::AppState;

#[derive(Debug, Parser)]
#[command(name = "crossway-server", about = "Street intersection routing service")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// GeoJSON roads file, overrides the configuration
    #[arg(long)]
    roads: Option<PathBuf>,
    /// Bind address, overrides the configuration
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(roads) = cli.roads {
        config.roads = roads;
    }
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    info!(roads = %config.roads.display(), "loading road data");
    let text = std::fs::read_to_string(&config.roads)?;
    let records = records_from_geojson(&text, &config.graph)?;
    let graph = build_road_graph(records, &config.graph);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped = graph.skipped_records(),
        "road graph ready"
    );

    let state = AppState {
        graph: Arc::new(graph),
    };
    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests));

    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install shutdown handler");
        return;
    }
    info!("shutting down");
}
