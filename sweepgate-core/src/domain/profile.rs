//! The per-archetype threshold set of a liquidity model.
//!
//! Field names on the wire match the persisted profile document:
//! `adx_min`, `post_sweep_delay`, `require_vwap_flip`, `expected_vwap`,
//! `grade_weights {sweep, mss, vwap, adx, bias}`, `bias_mode`, `notes`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::result::GateName;

/// How the three bias timeframes must line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasMode {
    /// Mid and low timeframes aligned with the trade; HTF unchecked.
    Continuation,
    /// Mid and low aligned, HTF disagreeing (fading the higher timeframe).
    Reversal,
}

impl fmt::Display for BiasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Continuation => "continuation",
            Self::Reversal => "reversal",
        })
    }
}

/// Expected price/VWAP interaction for the archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VwapRelation {
    Support,
    Resistance,
    Flip,
    Reclaim,
}

impl fmt::Display for VwapRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Support => "support",
            Self::Resistance => "resistance",
            Self::Flip => "flip",
            Self::Reclaim => "reclaim",
        })
    }
}

/// Integer grade weights. They need not sum to 100; the grade is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradeWeights {
    pub sweep: u32,
    #[serde(rename = "mss")]
    pub structural_shift: u32,
    pub vwap: u32,
    pub adx: u32,
    pub bias: u32,
}

impl GradeWeights {
    pub const fn new(sweep: u32, structural_shift: u32, vwap: u32, adx: u32, bias: u32) -> Self {
        Self {
            sweep,
            structural_shift,
            vwap,
            adx,
            bias,
        }
    }

    /// Weight carried by a gate. Delay and micro-confirmation are hard gates
    /// with no weight of their own.
    pub fn weight_for(&self, gate: GateName) -> u32 {
        match gate {
            GateName::Sweep => self.sweep,
            GateName::StructuralShift => self.structural_shift,
            GateName::Vwap => self.vwap,
            GateName::Adx => self.adx,
            GateName::Bias => self.bias,
            GateName::Delay | GateName::Micro => 0,
        }
    }

    /// Sum of all weights, widened so any stored values add without overflow.
    pub fn total(&self) -> u64 {
        [self.sweep, self.structural_shift, self.vwap, self.adx, self.bias]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

impl Default for GradeWeights {
    fn default() -> Self {
        Self::new(30, 20, 20, 15, 15)
    }
}

/// Complete threshold configuration for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub bias_mode: BiasMode,
    pub adx_min: f64,
    #[serde(rename = "post_sweep_delay")]
    pub post_sweep_delay_bars: u32,
    pub require_vwap_flip: bool,
    #[serde(rename = "expected_vwap")]
    pub expected_vwap_relation: VwapRelation,
    /// Flip/reclaim also needs a confirmed close through VWAP.
    #[serde(default)]
    pub close_confirm: bool,
    pub grade_weights: GradeWeights,
    #[serde(default)]
    pub notes: String,
}
