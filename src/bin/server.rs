//! HTTP Server for the Insight Dashboard UI

use anyhow::Context;
use clap::Parser;
use insight_dashboard::api;
use insight_dashboard::config::{init_logging, ServerConfig};
use insight_dashboard::{DatasetLoader, InsightService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Serves filter, chart and stats endpoints over the insights dataset")]
struct Args {
    /// Address to listen on (or set INSIGHTS_BIND_ADDR)
    #[arg(short, long)]
    bind: Option<String>,

    /// Path to the JSON dataset (or set INSIGHTS_DATA_PATH)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let config = ServerConfig::resolve(args.bind, args.data);
    info!("Starting Insight Dashboard API Server...");

    let service = Arc::new(InsightService::new(DatasetLoader::new(
        config.data_paths.clone(),
    )));

    // Populate the dataset cache before the first request arrives.
    let warm = Arc::clone(&service);
    match tokio::task::spawn_blocking(move || warm.dataset().map(|d| d.len())).await? {
        Ok(count) => info!("[OK] Dataset ready with {} insights", count),
        Err(e) => warn!("[WARN] Dataset unavailable, data endpoints will fail: {}", e),
    }

    let app = api::router(service);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
