//! Bulk adaptation of profiles from a "Model Summary" statistics sheet.
//!
//! Each summary row names an archetype and carries the average ADX at entry
//! plus three VWAP-interaction percentages. Adaptation is best-effort: a row
//! with an unknown archetype is skipped, and each field (ADX floor, VWAP
//! expectation) is updated independently when its inputs parse. Every skip
//! is recorded in the [`AdaptReport`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;

use crate::domain::{BiasMode, Profile, VwapRelation};

pub const COL_ARCHETYPE: &str = "Archetype";
pub const COL_AVG_ADX_ENTRY: &str = "Avg_ADX_Entry";
pub const COL_VWAP_RECLAIM: &str = "VWAP_reclaim/support";
pub const COL_VWAP_REJECTION: &str = "VWAP_rejection/resistance";
pub const COL_VWAP_FLIP: &str = "VWAP_flip/cross";

/// Constants of the ADX floor rule: `adx_min = max(floor, round(avg - margin))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdaptPolicy {
    pub adx_floor: f64,
    pub adx_margin: f64,
}

impl Default for AdaptPolicy {
    fn default() -> Self {
        Self {
            adx_floor: 18.0,
            adx_margin: 2.0,
        }
    }
}

impl AdaptPolicy {
    /// New ADX floor for an archetype whose entries averaged `avg_adx`.
    ///
    /// Rounds half to even. Never returns less than `adx_floor`.
    pub fn adx_min_for(&self, avg_adx: f64) -> f64 {
        (avg_adx - self.adx_margin)
            .round_ties_even()
            .max(self.adx_floor)
    }
}

/// One already-parsed row of the summary sheet, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRow {
    cells: BTreeMap<String, String>,
}

impl SummaryRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl ToString) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl ToString) {
        self.cells.insert(column.to_string(), value.to_string());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn archetype(&self) -> Option<&str> {
        self.get(COL_ARCHETYPE)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Read rows from a CSV export of the summary sheet (header row required).
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Vec<Self>, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let row = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }

    fn number(&self, column: &'static str) -> Cell {
        match self.get(column).map(str::trim) {
            None | Some("") => Cell::Missing,
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Cell::Value(v),
                _ => Cell::Invalid(raw.to_string()),
            },
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SummaryRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

enum Cell {
    Missing,
    Value(f64),
    Invalid(String),
}

/// Which part of a profile a skip applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptField {
    /// The whole row.
    Row,
    AdxMin,
    Vwap,
}

/// Why a row or field was not applied.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum SkipReason {
    #[error("no archetype name")]
    MissingArchetype,
    #[error("archetype not in store")]
    UnknownArchetype,
    #[error("column '{0}' missing")]
    MissingColumn(&'static str),
    #[error("column '{column}' is not numeric: '{raw}'")]
    NonNumeric { column: &'static str, raw: String },
    #[error("column '{column}' must be positive, got {value}")]
    NonPositive { column: &'static str, value: f64 },
}

/// A skipped row or field, by 0-based row index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedField {
    pub row: usize,
    pub archetype: Option<String>,
    pub field: AdaptField,
    pub reason: SkipReason,
}

/// Diagnostics of one `bulk_adapt` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdaptReport {
    pub rows_seen: usize,
    /// Archetypes with at least one field updated, in first-touch order.
    pub updated: Vec<String>,
    pub skipped: Vec<SkippedField>,
}

impl AdaptReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub(crate) fn touch(&mut self, name: &str) {
        if !self.updated.iter().any(|n| n == name) {
            self.updated.push(name.to_string());
        }
    }
}

/// Plurality vote among the three VWAP percentages.
///
/// Resistance wins ties against reclaim and flip; flip wins ties against reclaim.
pub fn vote_vwap_relation(reclaim: f64, rejection: f64, flip: f64) -> VwapRelation {
    if rejection >= reclaim && rejection >= flip {
        VwapRelation::Resistance
    } else if flip >= reclaim && flip >= rejection {
        VwapRelation::Flip
    } else {
        VwapRelation::Support
    }
}

/// Apply one row's statistics to `profile`, recording skipped fields.
///
/// Returns true if any field changed.
pub(crate) fn adapt_profile(
    profile: &mut Profile,
    row: &SummaryRow,
    index: usize,
    name: &str,
    policy: &AdaptPolicy,
    skipped: &mut Vec<SkippedField>,
) -> bool {
    let mut skip = |field, reason| {
        skipped.push(SkippedField {
            row: index,
            archetype: Some(name.to_string()),
            field,
            reason,
        })
    };
    let mut changed = false;

    match row.number(COL_AVG_ADX_ENTRY) {
        Cell::Value(avg) if avg > 0.0 => {
            profile.adx_min = policy.adx_min_for(avg);
            changed = true;
        }
        Cell::Value(value) => skip(
            AdaptField::AdxMin,
            SkipReason::NonPositive {
                column: COL_AVG_ADX_ENTRY,
                value,
            },
        ),
        Cell::Missing => skip(
            AdaptField::AdxMin,
            SkipReason::MissingColumn(COL_AVG_ADX_ENTRY),
        ),
        Cell::Invalid(raw) => skip(
            AdaptField::AdxMin,
            SkipReason::NonNumeric {
                column: COL_AVG_ADX_ENTRY,
                raw,
            },
        ),
    }

    // Missing percentages count as zero; a malformed one voids the vote.
    let mut pct = [0.0_f64; 3];
    let mut invalid = None;
    for (slot, column) in pct
        .iter_mut()
        .zip([COL_VWAP_RECLAIM, COL_VWAP_REJECTION, COL_VWAP_FLIP])
    {
        match row.number(column) {
            Cell::Value(v) => *slot = v,
            Cell::Missing => {}
            Cell::Invalid(raw) => {
                invalid = Some(SkipReason::NonNumeric { column, raw });
                break;
            }
        }
    }

    match invalid {
        Some(reason) => skip(AdaptField::Vwap, reason),
        None => {
            let [reclaim, rejection, flip] = pct;
            let relation = vote_vwap_relation(reclaim, rejection, flip);
            profile.expected_vwap_relation = relation;
            match relation {
                VwapRelation::Resistance | VwapRelation::Flip => profile.require_vwap_flip = true,
                _ => {
                    if profile.bias_mode == BiasMode::Continuation {
                        profile.require_vwap_flip = false;
                    }
                }
            }
            changed = true;
        }
    }

    changed
}

pub(crate) fn record_row_skip(
    report: &mut AdaptReport,
    index: usize,
    archetype: Option<&str>,
    reason: SkipReason,
) {
    report.skipped.push(SkippedField {
        row: index,
        archetype: archetype.map(str::to_string),
        field: AdaptField::Row,
        reason,
    });
}
