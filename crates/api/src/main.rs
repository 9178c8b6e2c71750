//! Climate API - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialise logging")?;

    info!("=== Climate API v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Serving dataset {}", config.database.path.display());

    run_server(config).await.context("climate API terminated")?;

    Ok(())
}
