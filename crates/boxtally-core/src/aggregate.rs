// Season aggregation: fold per-matchup records into per-team totals, then
// finalize rate categories into per-matchup averages.

use std::collections::BTreeMap;

use tracing::debug;

use crate::category::StatCategory;
use crate::extract::MatchupStatRecord;

/// Number of decimal digits kept for rate categories.
pub const RATE_DECIMALS: usize = 3;

// ---------------------------------------------------------------------------
// TeamAccumulator
// ---------------------------------------------------------------------------

/// Running totals for one team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamTally {
    pub matchups_played: u32,
    pub totals: BTreeMap<StatCategory, f64>,
}

/// Per-team running totals, keyed by team display name.
///
/// Rate categories are summed here like everything else; they only become
/// averages in [`TeamAccumulator::finalize`], which consumes the accumulator.
#[derive(Debug, Clone, Default)]
pub struct TeamAccumulator {
    teams: BTreeMap<String, TeamTally>,
}

impl TeamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one team's record from one matchup.
    ///
    /// An empty record is not a played matchup: the team is neither counted
    /// nor created. Null values are skipped, not added as zero.
    pub fn fold_matchup(&mut self, team_name: &str, record: &MatchupStatRecord) {
        if record.is_empty() {
            debug!("skipping empty stat record for {team_name}");
            return;
        }

        let tally = self.teams.entry(team_name.to_string()).or_default();
        tally.matchups_played += 1;

        for (category, score) in record {
            let Some(value) = score.value else {
                continue;
            };
            *tally.totals.entry(*category).or_insert(0.0) += value;
        }
    }

    pub fn team(&self, team_name: &str) -> Option<&TeamTally> {
        self.teams.get(team_name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Divide every rate category by the team's matchup count and round.
    pub fn finalize(self) -> TeamStats {
        let teams = self
            .teams
            .into_iter()
            .map(|(name, tally)| {
                let count = f64::from(tally.matchups_played);
                let totals = tally
                    .totals
                    .into_iter()
                    .map(|(category, total)| {
                        let value = if category.is_rate() {
                            round_to(total / count, RATE_DECIMALS)
                        } else {
                            total
                        };
                        (category, value)
                    })
                    .collect();
                (
                    name,
                    TeamLine {
                        matchups_played: tally.matchups_played,
                        totals,
                    },
                )
            })
            .collect();

        TeamStats { teams }
    }
}

// ---------------------------------------------------------------------------
// TeamStats (finalized)
// ---------------------------------------------------------------------------

/// One team's finalized season line.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamLine {
    pub matchups_played: u32,
    pub totals: BTreeMap<StatCategory, f64>,
}

impl TeamLine {
    pub fn get(&self, category: StatCategory) -> Option<f64> {
        self.totals.get(&category).copied()
    }
}

/// Finalized season stats for every team that played at least one matchup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStats {
    pub teams: BTreeMap<String, TeamLine>,
}

impl TeamStats {
    pub fn team(&self, team_name: &str) -> Option<&TeamLine> {
        self.teams.get(team_name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Round to `decimals` digits using the exact decimal expansion of `value`.
///
/// Scaling by a power of ten first would round binary near-halves such as
/// `1.0005` (stored as `1.000499...`) the wrong way.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
