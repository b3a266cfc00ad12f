//! Car Price Prediction API - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_logging(settings.logging.max_level()?, settings.logging.json)?;

    info!("=== Car Price Prediction API v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Model artifact: {}", settings.model.path);

    run_server(settings).await?;

    Ok(())
}
