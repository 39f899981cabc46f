// Scoring categories and the ESPN stat-id lookup table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// StatCategory
// ---------------------------------------------------------------------------

/// One of the league's head-to-head scoring categories.
///
/// The variant order is the display order used by the presenter, so
/// `BTreeMap<StatCategory, _>` iterates in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatCategory {
    R,
    HR,
    RBI,
    OBP,
    SB,
    K,
    W,
    SV,
    ERA,
    WHIP,
}

/// Fixed display column order.
pub const DISPLAY_ORDER: [StatCategory; 10] = [
    StatCategory::R,
    StatCategory::HR,
    StatCategory::RBI,
    StatCategory::OBP,
    StatCategory::SB,
    StatCategory::K,
    StatCategory::W,
    StatCategory::SV,
    StatCategory::ERA,
    StatCategory::WHIP,
];

/// Whether a category is summed or averaged over a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Counting,
    Rate,
}

impl StatCategory {
    /// Short label used as the JSON key and table header.
    pub fn abbrev(self) -> &'static str {
        match self {
            StatCategory::R => "R",
            StatCategory::HR => "HR",
            StatCategory::RBI => "RBI",
            StatCategory::OBP => "OBP",
            StatCategory::SB => "SB",
            StatCategory::K => "K",
            StatCategory::W => "W",
            StatCategory::SV => "SV",
            StatCategory::ERA => "ERA",
            StatCategory::WHIP => "WHIP",
        }
    }

    /// Column of this category in [`DISPLAY_ORDER`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn kind(self) -> CategoryKind {
        match self {
            StatCategory::OBP | StatCategory::ERA | StatCategory::WHIP => CategoryKind::Rate,
            _ => CategoryKind::Counting,
        }
    }

    pub fn is_rate(self) -> bool {
        self.kind() == CategoryKind::Rate
    }

    /// ERA and WHIP rank ascending; everything else ranks descending.
    pub fn lower_is_better(self) -> bool {
        matches!(self, StatCategory::ERA | StatCategory::WHIP)
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stat category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for StatCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DISPLAY_ORDER
            .iter()
            .copied()
            .find(|c| c.abbrev() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for StatCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.abbrev())
    }
}

impl<'de> Deserialize<'de> for StatCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CategoryLookup
// ---------------------------------------------------------------------------

/// ESPN stat id -> category.
const ESPN_STAT_IDS: [(u32, StatCategory); 10] = [
    (20, StatCategory::R),
    (5, StatCategory::HR),
    (21, StatCategory::RBI),
    (17, StatCategory::OBP),
    (23, StatCategory::SB),
    (48, StatCategory::K),
    (53, StatCategory::W),
    (57, StatCategory::SV),
    (47, StatCategory::ERA),
    (41, StatCategory::WHIP),
];

/// Immutable mapping from a source system's numeric stat ids to categories.
///
/// Built once at startup and passed by reference to the extractor.
#[derive(Debug, Clone)]
pub struct CategoryLookup {
    by_id: HashMap<u32, StatCategory>,
}

impl CategoryLookup {
    /// The ESPN fantasy baseball stat-id table.
    pub fn espn() -> Self {
        Self {
            by_id: ESPN_STAT_IDS.into_iter().collect(),
        }
    }

    pub fn get(&self, stat_id: u32) -> Option<StatCategory> {
        self.by_id.get(&stat_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for CategoryLookup {
    fn default() -> Self {
        Self::espn()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
