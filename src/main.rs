use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use blockharvest::config::Config;
use blockharvest::exclusions::ExclusionList;
use blockharvest::init::{prepare_output_dir, setup_logging};
use blockharvest::orchestrator::Orchestrator;
use blockharvest::stats::RunStats;
use blockharvest::validator;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load Config
    let config_path = std::env::args().nth(1).unwrap_or("config.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).await?
    } else {
        Config::default()
    };

    // 2. Setup Logging
    setup_logging(&config);
    info!("Starting blockharvest...");

    if !std::path::Path::new(&config_path).exists() {
        info!("Config file not found, using defaults.");
    }

    // 3. Fresh output files & exclusion list
    prepare_output_dir(&config).await?;
    let exclusions = Arc::new(ExclusionList::load(&config.exclusion_file).await);

    // 4. Build the NS validator
    let validator = validator::create_validator(&config)?;

    // 5. Run every source pipeline to a terminal state
    let stats = RunStats::new();
    let orchestrator = Orchestrator::new(config, validator, exclusions, stats.clone());
    let summary = orchestrator.run().await?;

    // 6. Report
    stats.dump();
    info!(
        "Run complete: {}/{} sources finished ({} skipped, {} aborted), {} domains written",
        summary.completed, summary.launched, summary.skipped, summary.aborted, summary.written
    );

    // Nonzero exit when the whole run produced nothing.
    if summary.written == 0 {
        std::process::exit(1);
    }
    Ok(())
}
