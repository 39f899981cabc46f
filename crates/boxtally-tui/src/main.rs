// Dashboard entry point.
//
// 1. Initialize tracing (log to file, the terminal belongs to the UI)
// 2. Load config to find the snapshot
// 3. Load the snapshot and build the display view
// 4. Run the dashboard until the user quits

use std::path::Path;

use anyhow::Context;
use boxtally_app::{config, logging};
use boxtally_core::present::DisplayView;
use boxtally_core::snapshot::load_snapshot;
use boxtally_tui::ViewState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing("boxtally-dashboard")?;
    info!("dashboard starting up");

    let config = config::load_config().context("failed to load configuration")?;

    let snapshot_path = Path::new(&config.output.snapshot_path);
    let snapshot = load_snapshot(snapshot_path).with_context(|| {
        format!(
            "failed to load {}; run boxtally first",
            snapshot_path.display()
        )
    })?;
    let view = DisplayView::from_snapshot(&snapshot);
    info!("Loaded {} teams from {}", view.rows.len(), snapshot_path.display());

    let state = ViewState::new(view, snapshot_path.display().to_string());
    boxtally_tui::run(state).await?;

    info!("dashboard exited");
    Ok(())
}
