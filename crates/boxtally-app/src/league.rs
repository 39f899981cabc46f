// League data as the aggregation pipeline sees it, and the source trait the
// ESPN client implements.

use std::collections::BTreeMap;

use async_trait::async_trait;
use boxtally_core::extract::MatchupStatRecord;

use crate::espn::EspnError;

/// A fantasy team in the league.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueTeam {
    pub team_id: u32,
    pub team_name: String,
}

/// League-level state needed to walk the season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueInfo {
    /// Last matchup period that has started (inclusive upper bound).
    pub current_matchup_period: u32,
    /// Current scoring period (day) in ESPN's calendar.
    pub current_scoring_period: u32,
    pub teams: Vec<LeagueTeam>,
}

impl LeagueInfo {
    pub fn team_name(&self, team_id: u32) -> Option<&str> {
        self.teams
            .iter()
            .find(|t| t.team_id == team_id)
            .map(|t| t.team_name.as_str())
    }

    /// Team id -> team name, as written to `teams.json`.
    pub fn team_directory(&self) -> BTreeMap<u32, String> {
        self.teams
            .iter()
            .map(|t| (t.team_id, t.team_name.clone()))
            .collect()
    }
}

/// One side of a matchup with its extracted category stats.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSide {
    pub team_name: String,
    pub stats: MatchupStatRecord,
}

/// A head-to-head matchup in one period. Either side may be missing (bye).
#[derive(Debug, Clone, PartialEq)]
pub struct BoxScore {
    pub matchup_period: u32,
    pub home: Option<TeamSide>,
    pub away: Option<TeamSide>,
}

impl BoxScore {
    /// Both sides, home first, skipping absent ones.
    pub fn sides(&self) -> impl Iterator<Item = &TeamSide> {
        self.home.iter().chain(self.away.iter())
    }
}

/// Where league state and box scores come from.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn league_info(&self) -> Result<LeagueInfo, EspnError>;

    async fn box_scores(
        &self,
        league: &LeagueInfo,
        matchup_period: u32,
    ) -> Result<Vec<BoxScore>, EspnError>;
}
