// Season aggregation pipeline: walk matchup periods, fold box scores, write
// the snapshot, and build the display view.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use boxtally_core::aggregate::{TeamAccumulator, TeamStats};
use boxtally_core::present::DisplayView;
use boxtally_core::snapshot::{write_atomic, write_snapshot, Snapshot, SnapshotError};
use tracing::{debug, info};

use crate::espn::EspnError;
use crate::league::{BoxScore, LeagueInfo, LeagueSource};

/// Outcome of one aggregation run.
#[derive(Debug, Clone)]
pub struct SeasonReport {
    pub periods_processed: u32,
    pub stats: TeamStats,
}

/// Fold one period's box scores into the accumulator.
pub fn fold_period(acc: &mut TeamAccumulator, box_scores: &[BoxScore]) {
    for box_score in box_scores {
        for side in box_score.sides() {
            acc.fold_matchup(&side.team_name, &side.stats);
        }
    }
}

/// Aggregate every matchup period from 1 through the league's current period.
///
/// Periods are fetched one at a time in ascending order. Any fetch error
/// aborts the run; nothing partial is returned.
pub async fn aggregate_season<S>(source: &S) -> Result<SeasonReport, EspnError>
where
    S: LeagueSource + ?Sized,
{
    let league = source.league_info().await?;
    aggregate_periods(source, &league).await
}

/// Aggregate with already-fetched league info.
pub async fn aggregate_periods<S>(
    source: &S,
    league: &LeagueInfo,
) -> Result<SeasonReport, EspnError>
where
    S: LeagueSource + ?Sized,
{
    let mut acc = TeamAccumulator::new();

    for period in 1..=league.current_matchup_period {
        let box_scores = source.box_scores(league, period).await?;
        debug!("period {period}: {} box scores", box_scores.len());
        fold_period(&mut acc, &box_scores);
    }

    info!(
        "Aggregated {} periods for {} teams",
        league.current_matchup_period,
        acc.len()
    );

    Ok(SeasonReport {
        periods_processed: league.current_matchup_period,
        stats: acc.finalize(),
    })
}

/// Write the snapshot and return the display view built from it.
pub fn publish(stats: &TeamStats, snapshot_path: &Path) -> Result<DisplayView, SnapshotError> {
    let snapshot = Snapshot::from(stats);
    write_snapshot(snapshot_path, &snapshot)?;
    Ok(DisplayView::from_snapshot(&snapshot))
}

/// Write `teams.json` (team id -> team name). An existing file is only
/// replaced once the new one is complete.
pub fn write_team_directory(path: &Path, league: &LeagueInfo) -> anyhow::Result<()> {
    let directory: BTreeMap<u32, String> = league.team_directory();
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(&directory, &mut ser).context("failed to encode team directory")?;

    write_atomic(path, &buf).with_context(|| format!("failed to write {}", path.display()))?;

    info!("Wrote {} teams to {}", directory.len(), path.display());
    Ok(())
}
