// ESPN fantasy API client.
//
// Two reads per run shape: one league read (status + teams) and one schedule
// read per matchup period. Requests go out strictly one at a time.

use std::time::Duration;

use async_trait::async_trait;
use boxtally_core::category::CategoryLookup;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::types::{decode_box_scores, RawLeague, RawSchedule};
use super::EspnError;
use crate::config::Config;
use crate::league::{BoxScore, LeagueInfo, LeagueSource};

const USER_AGENT: &str = concat!("boxtally/", env!("CARGO_PKG_VERSION"));
const FANTASY_FILTER_HEADER: &str = "x-fantasy-filter";

/// HTTP client bound to one league and season.
pub struct EspnClient {
    http: reqwest::Client,
    league_url: String,
    lookup: CategoryLookup,
}

impl EspnClient {
    /// Build a client from config. Session cookies are attached to every
    /// request when both `espn_s2` and `swid` are configured; values that
    /// can't be sent as a header are rejected here.
    pub fn from_config(config: &Config, lookup: CategoryLookup) -> Result<Self, EspnError> {
        let mut headers = HeaderMap::new();
        if let (Some(s2), Some(swid)) = (&config.credentials.espn_s2, &config.credentials.swid) {
            let cookie = format!("espn_s2={}; SWID={}", s2.trim(), swid.trim());
            let value = HeaderValue::from_str(&cookie).map_err(|_| {
                warn!("espn_s2/SWID contain characters not allowed in a cookie");
                EspnError::InvalidCredentials
            })?;
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.espn.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(EspnError::Client)?;

        Ok(Self {
            http,
            league_url: league_url(
                &config.espn.base_url,
                config.league.season,
                config.league.league_id,
            ),
            lookup,
        })
    }

    pub fn league_url(&self) -> &str {
        &self.league_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        query: &[(&str, String)],
        fantasy_filter: Option<String>,
    ) -> Result<T, EspnError> {
        let url = self.league_url.clone();
        let mut request = self.http.get(&url).query(query);
        if let Some(filter) = fantasy_filter {
            request = request.header(FANTASY_FILTER_HEADER, filter);
        }

        debug!(%url, ?query, "ESPN request");
        let response = request.send().await.map_err(|source| EspnError::Request {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(EspnError::Unauthorized { url, status });
        }
        if !status.is_success() {
            return Err(EspnError::Status { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| EspnError::Decode { url, source })
    }
}

#[async_trait]
impl LeagueSource for EspnClient {
    async fn league_info(&self) -> Result<LeagueInfo, EspnError> {
        let query = [
            ("view", "mTeam".to_string()),
            ("view", "mStatus".to_string()),
            ("view", "mSettings".to_string()),
        ];
        let raw: RawLeague = self.get(&query, None).await?;
        let info = LeagueInfo::try_from(raw)?;
        info!(
            "League loaded: {} teams, matchup period {}, scoring period {}",
            info.teams.len(),
            info.current_matchup_period,
            info.current_scoring_period
        );
        Ok(info)
    }

    async fn box_scores(
        &self,
        league: &LeagueInfo,
        matchup_period: u32,
    ) -> Result<Vec<BoxScore>, EspnError> {
        let query = [
            ("view", "mMatchupScore".to_string()),
            ("view", "mScoreboard".to_string()),
            ("scoringPeriodId", league.current_scoring_period.to_string()),
        ];
        let raw: RawSchedule = self
            .get(&query, Some(schedule_filter(matchup_period)))
            .await?;
        Ok(decode_box_scores(
            &raw.schedule,
            league,
            matchup_period,
            &self.lookup,
        ))
    }
}

/// League endpoint for a season.
pub fn league_url(base_url: &str, season: u16, league_id: u64) -> String {
    format!(
        "{}/seasons/{season}/segments/0/leagues/{league_id}",
        base_url.trim_end_matches('/')
    )
}

/// `x-fantasy-filter` value restricting the schedule to one matchup period.
pub fn schedule_filter(matchup_period: u32) -> String {
    serde_json::json!({
        "schedule": { "filterMatchupPeriodIds": { "value": [matchup_period] } }
    })
    .to_string()
}
