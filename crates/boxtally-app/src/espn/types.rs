// ESPN response shapes and their conversion into league types.
//
// League metadata is decoded into typed structs. The schedule is walked as
// raw JSON so one malformed matchup can't fail the whole period.

use boxtally_core::category::CategoryLookup;
use boxtally_core::extract::extract_side;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::EspnError;
use crate::league::{BoxScore, LeagueInfo, LeagueTeam, TeamSide};

// ---------------------------------------------------------------------------
// League (view=mTeam&view=mStatus&view=mSettings)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeague {
    #[serde(default)]
    pub scoring_period_id: u32,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub teams: Vec<RawTeam>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatus {
    #[serde(default)]
    pub current_matchup_period: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RawTeam {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl RawTeam {
    /// `name` when ESPN provides it, otherwise "location nickname" (the
    /// pre-2024 shape), otherwise a placeholder built from the id.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let joined = [self.location.as_deref(), self.nickname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            fallback_team_name(self.id)
        } else {
            joined
        }
    }
}

pub fn fallback_team_name(team_id: u32) -> String {
    format!("Team {team_id}")
}

impl TryFrom<RawLeague> for LeagueInfo {
    type Error = EspnError;

    fn try_from(raw: RawLeague) -> Result<Self, Self::Error> {
        let current_matchup_period = raw
            .status
            .and_then(|s| s.current_matchup_period)
            .ok_or(EspnError::MissingField("status.currentMatchupPeriod"))?;

        let teams = raw
            .teams
            .into_iter()
            .map(|t| LeagueTeam {
                team_id: t.id,
                team_name: t.display_name(),
            })
            .collect();

        Ok(LeagueInfo {
            current_matchup_period,
            current_scoring_period: raw.scoring_period_id,
            teams,
        })
    }
}

// ---------------------------------------------------------------------------
// Schedule (view=mMatchupScore&view=mScoreboard)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RawSchedule {
    #[serde(default)]
    pub schedule: Vec<Value>,
}

/// Convert one period's raw schedule entries into box scores.
///
/// Entries tagged with a different `matchupPeriodId` are dropped. Sides
/// without a `teamId` are treated as byes.
pub fn decode_box_scores(
    schedule: &[Value],
    league: &LeagueInfo,
    matchup_period: u32,
    lookup: &CategoryLookup,
) -> Vec<BoxScore> {
    schedule
        .iter()
        .filter(|entry| {
            match entry.get("matchupPeriodId").and_then(Value::as_u64) {
                Some(id) if id != u64::from(matchup_period) => {
                    debug!("dropping matchup from period {id} while reading {matchup_period}");
                    false
                }
                _ => true,
            }
        })
        .map(|entry| BoxScore {
            matchup_period,
            home: decode_side(entry.get("home"), league, lookup),
            away: decode_side(entry.get("away"), league, lookup),
        })
        .collect()
}

fn decode_side(
    side: Option<&Value>,
    league: &LeagueInfo,
    lookup: &CategoryLookup,
) -> Option<TeamSide> {
    let side = side?;
    let team_id = side
        .get("teamId")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())?;

    let team_name = match league.team_name(team_id) {
        Some(name) => name.to_string(),
        None => {
            warn!("box score references unknown team id {team_id}");
            fallback_team_name(team_id)
        }
    };

    Some(TeamSide {
        team_name,
        stats: extract_side(side, lookup),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
