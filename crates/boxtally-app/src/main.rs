// Season stats aggregator entry point.
//
// 1. Initialize tracing (log to file)
// 2. Load config
// 3. Build the ESPN client
// 4. Fold every matchup period into per-team totals
// 5. Write the snapshot (fatal on failure)
// 6. Print the display-ordered view to stdout

use std::path::Path;

use anyhow::Context;
use boxtally_app::{config, espn, logging, pipeline};
use boxtally_core::category::CategoryLookup;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing("boxtally")?;
    info!("boxtally starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league {} season {}",
        config.league.league_id, config.league.season
    );
    if !config.credentials.is_complete() {
        warn!("ESPN credentials not configured; only public leagues will load");
    }

    let client = espn::EspnClient::from_config(&config, CategoryLookup::espn())
        .context("failed to build ESPN client")?;

    let report = pipeline::aggregate_season(&client)
        .await
        .context("failed to aggregate season stats")?;
    info!(
        "Processed {} matchup periods, {} teams",
        report.periods_processed,
        report.stats.len()
    );

    let snapshot_path = Path::new(&config.output.snapshot_path);
    let view = pipeline::publish(&report.stats, snapshot_path)
        .with_context(|| format!("failed to publish {}", snapshot_path.display()))?;

    println!("{}", view.to_json().context("failed to render stats view")?);

    info!("boxtally finished");
    Ok(())
}
