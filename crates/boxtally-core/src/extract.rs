// Box-score stat extraction.
//
// ESPN reports each side of a head-to-head category matchup as
// `cumulativeScore.scoreByStat`, keyed by numeric stat id (as a string):
//
//   "scoreByStat": { "20": { "score": 31.0, "result": "WIN" }, ... }
//
// Untracked or non-numeric ids are skipped. A record without the path yields
// an empty map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::category::{CategoryLookup, StatCategory};

/// Outcome of a single category in a single matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchupResult {
    Win,
    Loss,
    Tie,
    #[serde(other)]
    Unknown,
}

impl MatchupResult {
    fn from_json(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("WIN") => MatchupResult::Win,
            Some("LOSS") => MatchupResult::Loss,
            Some("TIE") => MatchupResult::Tie,
            _ => MatchupResult::Unknown,
        }
    }
}

/// One category's value for one team in one matchup. `value` is `None` when
/// the source reported null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub value: Option<f64>,
    pub result: MatchupResult,
}

/// All tracked categories for one team in one matchup.
pub type MatchupStatRecord = BTreeMap<StatCategory, CategoryScore>;

/// Extract the category scores for one side (home or away) of a box score.
///
/// `record` is the decoded side object (the value under `home` / `away`).
pub fn extract_side(record: &Value, lookup: &CategoryLookup) -> MatchupStatRecord {
    let mut stats = MatchupStatRecord::new();

    let Some(score_by_stat) = record
        .get("cumulativeScore")
        .and_then(|c| c.get("scoreByStat"))
        .and_then(Value::as_object)
    else {
        return stats;
    };

    for (stat_id, entry) in score_by_stat {
        let Ok(id) = stat_id.trim().parse::<u32>() else {
            debug!("ignoring non-numeric stat id {stat_id:?}");
            continue;
        };
        let Some(category) = lookup.get(id) else {
            continue;
        };

        let value = entry
            .get("score")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite());
        let result = MatchupResult::from_json(entry.get("result"));

        stats.insert(category, CategoryScore { value, result });
    }

    stats
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn side(score_by_stat: Value) -> Value {
        json!({
            "teamId": 3,
            "cumulativeScore": { "wins": 6, "losses": 4, "scoreByStat": score_by_stat }
        })
    }

    #[test]
    fn extracts_known_ids() {
        let lookup = CategoryLookup::espn();
        let record = side(json!({
            "20": { "score": 31.0, "result": "WIN" },
            "47": { "score": 3.86, "result": "LOSS" },
            "41": { "score": 1.21, "result": "TIE" }
        }));

        let stats = extract_side(&record, &lookup);
        assert_eq!(stats.len(), 3);
        assert_eq!(
            stats[&StatCategory::R],
            CategoryScore { value: Some(31.0), result: MatchupResult::Win }
        );
        assert_eq!(stats[&StatCategory::ERA].value, Some(3.86));
        assert_eq!(stats[&StatCategory::ERA].result, MatchupResult::Loss);
        assert_eq!(stats[&StatCategory::WHIP].result, MatchupResult::Tie);
    }

    #[test]
    fn drops_unknown_and_malformed_ids() {
        let lookup = CategoryLookup::espn();
        let record = side(json!({
            "20": { "score": 5.0, "result": "WIN" },
            "99": { "score": 1.0, "result": "WIN" },
            "abc": { "score": 2.0, "result": "WIN" }
        }));

        let stats = extract_side(&record, &lookup);
        assert_eq!(stats.len(), 1);
        assert!(stats.contains_key(&StatCategory::R));
    }

    #[test]
    fn null_score_is_kept_as_none() {
        let lookup = CategoryLookup::espn();
        let record = side(json!({
            "53": { "score": null, "result": null },
            "57": { "result": "LOSS" }
        }));

        let stats = extract_side(&record, &lookup);
        assert_eq!(stats[&StatCategory::W].value, None);
        assert_eq!(stats[&StatCategory::W].result, MatchupResult::Unknown);
        assert_eq!(stats[&StatCategory::SV].value, None);
        assert_eq!(stats[&StatCategory::SV].result, MatchupResult::Loss);
    }

    #[test]
    fn missing_path_yields_empty_record() {
        let lookup = CategoryLookup::espn();
        assert!(extract_side(&json!({}), &lookup).is_empty());
        assert!(extract_side(&json!({ "cumulativeScore": {} }), &lookup).is_empty());
        assert!(extract_side(&Value::Null, &lookup).is_empty());
        assert!(extract_side(
            &json!({ "cumulativeScore": { "scoreByStat": [1, 2, 3] } }),
            &lookup
        )
        .is_empty());
    }

    #[test]
    fn every_known_non_null_value_survives() {
        let lookup = CategoryLookup::espn();
        let ids = [20, 5, 21, 17, 23, 48, 53, 57, 47, 41];
        let mut map = serde_json::Map::new();
        for (i, id) in ids.iter().enumerate() {
            map.insert(
                id.to_string(),
                json!({ "score": i as f64 + 0.5, "result": "WIN" }),
            );
        }
        let stats = extract_side(&side(Value::Object(map)), &lookup);

        assert_eq!(stats.len(), ids.len());
        for (i, id) in ids.iter().enumerate() {
            let cat = lookup.get(*id).unwrap();
            assert_eq!(stats[&cat].value, Some(i as f64 + 0.5));
        }
    }

    #[test]
    fn unrecognised_result_string_is_unknown() {
        let lookup = CategoryLookup::espn();
        let record = side(json!({ "5": { "score": 2.0, "result": "UNDECIDED" } }));
        let stats = extract_side(&record, &lookup);
        assert_eq!(stats[&StatCategory::HR].result, MatchupResult::Unknown);
    }
}
