//! Evaluation output — verdict, grade, per-gate outcomes and advisory banners.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::profile::VwapRelation;

/// Identifies one gate in `GateResults` and in the grade weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateName {
    Sweep,
    Delay,
    StructuralShift,
    Vwap,
    Adx,
    Bias,
    Micro,
}

impl GateName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sweep => "sweep",
            Self::Delay => "delay",
            Self::StructuralShift => "structural_shift",
            Self::Vwap => "vwap",
            Self::Adx => "adx",
            Self::Bias => "bias",
            Self::Micro => "micro",
        }
    }
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-gate outcomes plus the derived values the gates consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResults {
    pub gates: BTreeMap<GateName, bool>,
    /// SMA3 − SMA6 of ADX.
    pub adx_slope: f64,
    /// The profile floor in force (before combining with the caller's).
    pub profile_adx_min: f64,
    pub expected_vwap: VwapRelation,
}

impl GateResults {
    /// Outcome of a gate, `None` when the gate was not modeled in this evaluation.
    pub fn get(&self, gate: GateName) -> Option<bool> {
        self.gates.get(&gate).copied()
    }

    pub fn passed(&self, gate: GateName) -> bool {
        self.get(gate).unwrap_or(false)
    }

    pub fn all_passed(&self) -> bool {
        self.gates.values().all(|&ok| ok)
    }

    pub fn failed(&self) -> impl Iterator<Item = GateName> + '_ {
        self.gates
            .iter()
            .filter(|(_, &ok)| !ok)
            .map(|(&name, _)| name)
    }
}

/// Non-blocking advisory attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Banner {
    /// ADX is below the snapshot's kill floor.
    BelowKillThreshold,
    /// VWAP is flat.
    ChopRisk,
    /// Explicit-sweep mode and no sweep is tagged.
    NoActiveSweep,
}

impl Banner {
    pub fn message(&self) -> &'static str {
        match self {
            Self::BelowKillThreshold => "Avoid/Exit: ADX below kill threshold",
            Self::ChopRisk => "Chop risk: VWAP flat",
            Self::NoActiveSweep => "No active sweep set",
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of one evaluation. Created fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub model_used: String,
    pub entry_ready: bool,
    /// Weighted confidence, 0..=100.
    pub grade: u8,
    pub gate_results: GateResults,
    pub banners: Vec<Banner>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_lists_only_false_gates() {
        let mut gates = BTreeMap::new();
        gates.insert(GateName::Delay, true);
        gates.insert(GateName::Bias, false);
        gates.insert(GateName::Adx, false);
        let r = GateResults {
            gates,
            adx_slope: 0.0,
            profile_adx_min: 24.0,
            expected_vwap: VwapRelation::Support,
        };
        let failed: Vec<_> = r.failed().collect();
        assert_eq!(failed, vec![GateName::Adx, GateName::Bias]);
        assert!(!r.all_passed());
        assert_eq!(r.get(GateName::Sweep), None);
        assert!(!r.passed(GateName::Sweep));
    }

    #[test]
    fn banner_messages() {
        assert_eq!(Banner::ChopRisk.to_string(), "Chop risk: VWAP flat");
        assert!(Banner::BelowKillThreshold.message().contains("kill threshold"));
    }
}
