//! Grader — weighted 0..=100 confidence from gate outcomes.
//!
//! `grade = clamp(0, 100, Σ weight[g] · passed[g])`. Weights are not
//! normalized; the clamp alone bounds the output.

use serde::{Deserialize, Serialize};

use crate::domain::{GateName, GateResults, GradeWeights};

/// How the sweep weight is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepCredit {
    /// The sweep was tagged upstream: credit its weight unconditionally.
    #[default]
    Always,
    /// Run the sweep gate and credit the weight only when it passes.
    Explicit,
}

const WEIGHTED: [GateName; 4] = [
    GateName::StructuralShift,
    GateName::Vwap,
    GateName::Adx,
    GateName::Bias,
];

/// Grade for `results` under `weights`.
pub fn grade(results: &GateResults, weights: &GradeWeights, sweep_credit: SweepCredit) -> u8 {
    let sweep_passed = match sweep_credit {
        SweepCredit::Always => true,
        SweepCredit::Explicit => results.passed(GateName::Sweep),
    };
    let sweep = if sweep_passed { weights.sweep as u64 } else { 0 };
    let rest: u64 = WEIGHTED
        .iter()
        .filter(|&&gate| results.passed(gate))
        .map(|&gate| weights.weight_for(gate) as u64)
        .sum();
    (sweep + rest).min(100) as u8
}
