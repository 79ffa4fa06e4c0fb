//! Rent Estimator - Main Entry Point

use anyhow::Context;
use api::{init_logging, load_config, run_server};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os("RENT_CONFIG").map(PathBuf::from);
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;

    init_logging(&config.log_level)?;

    info!("=== Rent Estimator v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Listings: {}, model: {}", config.listings_path.display(), config.model_path.display());

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install metrics recorder")?;

    run_server(&config, Some(metrics))
        .await
        .context("server stopped with an error")?;

    Ok(())
}
