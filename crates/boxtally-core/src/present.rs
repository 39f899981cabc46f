// Display-ordered view of a snapshot: teams alphabetical, categories in the
// fixed column order. Missing categories render as zero but rank last.

use std::cmp::Ordering;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::category::{StatCategory, DISPLAY_ORDER};
use crate::snapshot::Snapshot;

/// One team's row in display order. `values[i]` belongs to `DISPLAY_ORDER[i]`
/// and is `None` when the snapshot has no value for that category.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub team: String,
    pub values: [Option<f64>; DISPLAY_ORDER.len()],
}

impl DisplayRow {
    pub fn value(&self, category: StatCategory) -> Option<f64> {
        self.values[category.index()]
    }

    /// Value as shown on screen; missing categories read as zero.
    pub fn get(&self, category: StatCategory) -> f64 {
        self.value(category).unwrap_or(0.0)
    }
}

/// One team's categories min-max scaled to `[0, 1]` across all teams.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub team: String,
    pub values: [Option<f64>; DISPLAY_ORDER.len()],
}

/// All teams in alphabetical order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayView {
    pub rows: Vec<DisplayRow>,
}

impl DisplayView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        // BTreeMap iteration is already alphabetical by team name.
        let rows = snapshot
            .teams
            .iter()
            .map(|(team, totals)| {
                let mut values = [None; DISPLAY_ORDER.len()];
                for (slot, category) in values.iter_mut().zip(DISPLAY_ORDER) {
                    *slot = totals.get(&category).copied();
                }
                DisplayRow {
                    team: team.clone(),
                    values,
                }
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pretty JSON for the console, keys in display order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Rows sorted best-first by `category`: ascending for ERA/WHIP,
    /// descending otherwise. Teams without a value come last in either
    /// direction. Ties fall back to team name.
    pub fn rank_by(&self, category: StatCategory) -> Vec<&DisplayRow> {
        let mut ranked: Vec<&DisplayRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| {
            let ord = match (a.value(category), b.value(category)) {
                (Some(va), Some(vb)) => {
                    let ord = if category.lower_is_better() {
                        va.partial_cmp(&vb)
                    } else {
                        vb.partial_cmp(&va)
                    };
                    ord.unwrap_or(Ordering::Equal)
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            ord.then_with(|| a.team.cmp(&b.team))
        });
        ranked
    }

    /// Scale every category to `[0, 1]` between the lowest and highest team.
    ///
    /// A category where every present value is equal maps to 0. Missing
    /// values stay missing and do not affect the bounds.
    pub fn normalized(&self) -> Vec<NormalizedRow> {
        let mut bounds = [(f64::INFINITY, f64::NEG_INFINITY); DISPLAY_ORDER.len()];
        for row in &self.rows {
            for ((min, max), value) in bounds.iter_mut().zip(row.values) {
                if let Some(v) = value {
                    *min = min.min(v);
                    *max = max.max(v);
                }
            }
        }

        self.rows
            .iter()
            .map(|row| {
                let mut values = [None; DISPLAY_ORDER.len()];
                for ((slot, value), (min, max)) in values.iter_mut().zip(row.values).zip(bounds) {
                    *slot = value.map(|v| {
                        let range = max - min;
                        if range > 0.0 {
                            (v - min) / range
                        } else {
                            0.0
                        }
                    });
                }
                NormalizedRow {
                    team: row.team.clone(),
                    values,
                }
            })
            .collect()
    }
}

impl Serialize for DisplayView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.team, &RowRef(row))?;
        }
        map.end()
    }
}

struct RowRef<'a>(&'a DisplayRow);

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DISPLAY_ORDER.len()))?;
        for (category, value) in DISPLAY_ORDER.iter().zip(self.0.values) {
            let value = value.unwrap_or(0.0);
            if category.is_rate() && value != 0.0 {
                map.serialize_entry(category, &value)?;
            } else {
                map.serialize_entry(category, &(value.round() as i64))?;
            }
        }
        map.end()
    }
}

/// Format a value for a table cell: three decimals for rate categories,
/// whole numbers otherwise.
pub fn format_value(category: StatCategory, value: f64) -> String {
    if category.is_rate() {
        format!("{value:.3}")
    } else {
        format!("{value:.0}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
