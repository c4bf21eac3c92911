//! WorkTracker - team activity tracking service
//!
//! Entry point: loads configuration, wires the application context and runs
//! the background sweeps until interrupted.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use worktracker_api::AppContext;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => warn!("no .env file found"),
    }

    let config = worktracker_infra::config::load()?;
    info!(
        database = %config.database.path,
        members = config.roster.len(),
        "starting worktracker"
    );

    let ctx = Arc::new(AppContext::new(config)?);
    ctx.start_schedulers().await?;
    info!("worktracker running, press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");

    if let Err(err) = ctx.stop_schedulers().await {
        error!(error = %err, "failed to stop background sweeps cleanly");
    }
    Ok(())
}
