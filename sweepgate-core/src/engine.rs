//! Evaluation orchestrator.
//!
//! One call composes model selection, profile resolution, the gate pass,
//! grading and advisory banners into a fresh [`EvaluationResult`]. The call
//! reads the store and the snapshot and writes nothing, so it is safe to
//! repeat between live profile edits.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{
    Banner, Direction, EvaluationResult, GateResults, MarketSnapshot, Profile, VwapSlope,
};
use crate::gates::{standard_gates, Gate, GateContext, SweepGate};
use crate::grader;
use crate::profiles::defaults::{fallback_profile, FALLBACK_MODEL};
use crate::profiles::ProfileStore;
use crate::selector;

pub use crate::grader::SweepCredit;

/// Orchestrator switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Let the model selector override `snapshot.liquidity_model`.
    pub auto_select: bool,
    pub sweep_credit: SweepCredit,
    /// Archetype used when the effective model is not in the store.
    pub fallback_model: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_select: true,
            sweep_credit: SweepCredit::Always,
            fallback_model: FALLBACK_MODEL.to_string(),
        }
    }
}

/// Evaluate with the default [`EngineConfig`].
pub fn evaluate(
    desired: Direction,
    snapshot: &MarketSnapshot,
    store: &ProfileStore,
) -> EvaluationResult {
    evaluate_with(&EngineConfig::default(), desired, snapshot, store)
}

/// Evaluate one snapshot for `desired`.
///
/// Never fails: an unknown model degrades to `config.fallback_model`, and
/// `model_used` names the profile that was actually applied.
pub fn evaluate_with(
    config: &EngineConfig,
    desired: Direction,
    snapshot: &MarketSnapshot,
    store: &ProfileStore,
) -> EvaluationResult {
    let requested = if config.auto_select {
        selector::select_model(
            store,
            snapshot.session,
            snapshot.sweep_type,
            desired,
            &snapshot.liquidity_model,
        )
    } else {
        snapshot.liquidity_model.clone()
    };
    let (model_used, profile) = resolve_profile(store, requested, &config.fallback_model);

    let ctx = GateContext {
        snapshot,
        profile: &profile,
        desired,
    };
    let mut gates = BTreeMap::new();
    for gate in active_gates(config.sweep_credit) {
        gates.insert(gate.name(), gate.evaluate(&ctx));
    }
    let gate_results = GateResults {
        gates,
        adx_slope: snapshot.adx_slope(),
        profile_adx_min: profile.adx_min,
        expected_vwap: profile.expected_vwap_relation,
    };

    let entry_ready = gate_results.all_passed();
    let grade = grader::grade(&gate_results, &profile.grade_weights, config.sweep_credit);
    let banners = banners(snapshot, config.sweep_credit);

    debug!(
        model = %model_used,
        direction = %desired,
        entry_ready,
        grade,
        failed = ?gate_results.failed().collect::<Vec<_>>(),
        "signal evaluated"
    );

    EvaluationResult {
        model_used,
        entry_ready,
        grade,
        gate_results,
        banners,
    }
}

fn active_gates(sweep_credit: SweepCredit) -> Vec<&'static dyn Gate> {
    let mut gates: Vec<&'static dyn Gate> = Vec::with_capacity(7);
    if sweep_credit == SweepCredit::Explicit {
        gates.push(&SweepGate);
    }
    gates.extend(standard_gates());
    gates
}

/// Effective profile for `requested`: the stored one, else the fallback
/// archetype, else the built-in fallback default.
fn resolve_profile<'s>(
    store: &'s ProfileStore,
    requested: String,
    fallback: &str,
) -> (String, Cow<'s, Profile>) {
    if let Ok(profile) = store.get(&requested) {
        return (requested, Cow::Borrowed(profile));
    }
    if let Ok(profile) = store.get(fallback) {
        debug!(requested = %requested, fallback = %fallback, "unknown model, using fallback");
        return (fallback.to_string(), Cow::Borrowed(profile));
    }
    warn!(
        requested = %requested,
        fallback = %fallback,
        "fallback model missing from store, using built-in default"
    );
    (FALLBACK_MODEL.to_string(), Cow::Owned(fallback_profile()))
}

fn banners(snapshot: &MarketSnapshot, sweep_credit: SweepCredit) -> Vec<Banner> {
    let mut out = Vec::new();
    if snapshot.adx_now < snapshot.adx_kill_floor {
        out.push(Banner::BelowKillThreshold);
    }
    if snapshot.vwap_slope == VwapSlope::Flat {
        out.push(Banner::ChopRisk);
    }
    if sweep_credit == SweepCredit::Explicit && snapshot.sweep_type.is_none() {
        out.push(Banner::NoActiveSweep);
    }
    out
}
