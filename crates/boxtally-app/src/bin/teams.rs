// Lists the league's teams and saves them to teams.json.

use std::path::Path;

use anyhow::Context;
use boxtally_app::league::LeagueSource;
use boxtally_app::{config, espn, logging, pipeline};
use boxtally_core::category::CategoryLookup;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing("boxtally-teams")?;

    let config = config::load_config().context("failed to load configuration")?;
    let client = espn::EspnClient::from_config(&config, CategoryLookup::espn())
        .context("failed to build ESPN client")?;

    let league = client
        .league_info()
        .await
        .context("failed to load league teams")?;

    println!("League Teams:");
    for (idx, team) in league.teams.iter().enumerate() {
        println!("[{idx}] {} (Team ID: {})", team.team_name, team.team_id);
    }

    let teams_path = Path::new(&config.output.teams_path);
    pipeline::write_team_directory(teams_path, &league)?;
    println!("Saved to {}", teams_path.display());

    info!("boxtally-teams finished");
    Ok(())
}
