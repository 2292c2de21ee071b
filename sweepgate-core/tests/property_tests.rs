//! Property tests for evaluation invariants.
//!
//! Uses proptest to verify:
//! 1. ADX monotonicity — raising ADX at a fixed slope never fails the ADX gate
//! 2. Grade clamp — any weights and outcomes stay within 0..=100
//! 3. AND-readiness — ready iff every modeled gate passed
//! 4. Reset idempotence — resetting twice equals resetting once
//! 5. Restore merge — a partial document changes only what it names

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use sweepgate_core::domain::{
    Bias, BiasMode, Direction, GateName, GateResults, GradeWeights, MarketSnapshot, Profile,
    Session, SweepType, VwapRelation, VwapSide, VwapSlope,
};
use sweepgate_core::gates::{AdxGate, Gate, GateContext};
use sweepgate_core::grader::{grade, SweepCredit};
use sweepgate_core::profiles::defaults::{fallback_profile, ARCHETYPES, FALLBACK_MODEL};
use sweepgate_core::profiles::ProfileStore;
use sweepgate_core::{evaluate_with, EngineConfig};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_adx() -> impl Strategy<Value = f64> {
    (0.0..80.0_f64).prop_map(|x| (x * 10.0).round() / 10.0)
}

fn arb_bias() -> impl Strategy<Value = Bias> {
    prop_oneof![Just(Bias::Bull), Just(Bias::Bear), Just(Bias::Neutral)]
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Long), Just(Direction::Short)]
}

fn arb_sweep() -> impl Strategy<Value = Option<SweepType>> {
    prop_oneof![
        Just(None),
        (0..SweepType::ALL.len()).prop_map(|i| Some(SweepType::ALL[i])),
    ]
}

fn arb_credit() -> impl Strategy<Value = SweepCredit> {
    prop_oneof![Just(SweepCredit::Always), Just(SweepCredit::Explicit)]
}

fn arb_weights() -> impl Strategy<Value = GradeWeights> {
    (0..=200u32, 0..=200u32, 0..=200u32, 0..=200u32, 0..=200u32)
        .prop_map(|(s, m, v, a, b)| GradeWeights::new(s, m, v, a, b))
}

fn arb_snapshot() -> impl Strategy<Value = MarketSnapshot> {
    let market = (
        prop_oneof![Just(VwapSide::Above), Just(VwapSide::Below), Just(VwapSide::Touching)],
        prop_oneof![Just(VwapSlope::Up), Just(VwapSlope::Down), Just(VwapSlope::Flat)],
        arb_adx(),
        arb_adx(),
        arb_adx(),
        0.0..30.0_f64,
    );
    let context = (
        prop_oneof![Just(Session::Asia), Just(Session::London), Just(Session::Ny)],
        proptest::option::of(arb_direction()),
        arb_bias(),
        arb_bias(),
        arb_bias(),
        (0..ARCHETYPES.len()).prop_map(|i| ARCHETYPES[i].to_string()),
        arb_sweep(),
        0..10u32,
    );
    let flags = (any::<bool>(), any::<bool>(), 0.0..40.0_f64, -2.0..2.0_f64);

    (market, context, flags).prop_map(
        |(
            (vwap_side, vwap_slope, adx_now, adx_sma3, adx_sma6, adx_kill_floor),
            (session, structural_shift, htf_bias, mid_bias, low_bias, model, sweep_type, bars),
            (micro_confirmation, close_confirmed, adx_min, adx_slope_min),
        )| MarketSnapshot {
            vwap_side,
            vwap_slope,
            adx_now,
            adx_sma3,
            adx_sma6,
            adx_kill_floor,
            session,
            structural_shift,
            htf_bias,
            mid_bias,
            low_bias,
            liquidity_model: model,
            sweep_type,
            bars_since_sweep: bars,
            micro_confirmation,
            close_confirmed,
            adx_min,
            adx_slope_min,
            ..MarketSnapshot::default()
        },
    )
}

fn profile_with_floor(adx_min: f64) -> Profile {
    Profile {
        adx_min,
        ..fallback_profile()
    }
}

// ── 1. ADX Monotonicity ──────────────────────────────────────────────

proptest! {
    /// If ADX passes at `a`, it passes at any `b >= a` with the same slope.
    #[test]
    fn adx_gate_is_monotonic_in_adx(
        a in arb_adx(),
        bump in 0.0..40.0_f64,
        profile_min in 0.0..40.0_f64,
        caller_min in 0.0..40.0_f64,
        slope in -3.0..3.0_f64,
        slope_min in -1.0..1.0_f64,
    ) {
        let profile = profile_with_floor(profile_min);
        let mut snap = MarketSnapshot {
            adx_now: a,
            adx_sma3: 25.0 + slope,
            adx_sma6: 25.0,
            adx_min: caller_min,
            adx_slope_min: slope_min,
            ..MarketSnapshot::default()
        };
        let low = AdxGate.evaluate(&GateContext { snapshot: &snap, profile: &profile, desired: Direction::Long });
        snap.adx_now = a + bump;
        let high = AdxGate.evaluate(&GateContext { snapshot: &snap, profile: &profile, desired: Direction::Long });
        prop_assert!(!low || high);
    }
}

// ── 2. Grade Clamp ───────────────────────────────────────────────────

proptest! {
    /// Any weight vector and any gate outcomes grade within 0..=100.
    #[test]
    fn grade_is_clamped(
        weights in arb_weights(),
        outcomes in proptest::collection::vec(any::<bool>(), 7),
        credit in arb_credit(),
    ) {
        let names = [
            GateName::Sweep,
            GateName::Delay,
            GateName::StructuralShift,
            GateName::Vwap,
            GateName::Adx,
            GateName::Bias,
            GateName::Micro,
        ];
        let gates: BTreeMap<GateName, bool> = names.into_iter().zip(outcomes).collect();
        let results = GateResults {
            gates,
            adx_slope: 0.0,
            profile_adx_min: 24.0,
            expected_vwap: VwapRelation::Support,
        };
        let g = grade(&results, &weights, credit);
        prop_assert!(g <= 100);
        if weights.total() <= 100 {
            prop_assert!(u64::from(g) <= weights.total());
        }
    }

    /// Full evaluations with tuned weights never escape the clamp either.
    #[test]
    fn evaluated_grade_is_clamped(
        snap in arb_snapshot(),
        desired in arb_direction(),
        weights in arb_weights(),
        credit in arb_credit(),
    ) {
        let mut store = ProfileStore::new();
        for name in ARCHETYPES {
            store.profile_mut(name).unwrap().grade_weights = weights;
        }
        let config = EngineConfig { sweep_credit: credit, ..EngineConfig::default() };
        let result = evaluate_with(&config, desired, &snap, &store);
        prop_assert!(result.grade <= 100);
    }
}

// ── 3. AND-Readiness ─────────────────────────────────────────────────

proptest! {
    /// Readiness is exactly the conjunction of the reported gates.
    #[test]
    fn ready_iff_every_gate_passed(
        snap in arb_snapshot(),
        desired in arb_direction(),
        credit in arb_credit(),
    ) {
        let config = EngineConfig { sweep_credit: credit, ..EngineConfig::default() };
        let result = evaluate_with(&config, desired, &snap, &ProfileStore::new());
        let all = result.gate_results.gates.values().all(|&ok| ok);
        prop_assert_eq!(result.entry_ready, all);
        prop_assert_eq!(
            result.gate_results.get(GateName::Sweep).is_some(),
            credit == SweepCredit::Explicit
        );
    }

    /// Breaking any single gate of a ready setup makes it not ready.
    #[test]
    fn any_single_failure_blocks_entry(which in 0..6usize) {
        let mut store = ProfileStore::new();
        {
            let p = store.profile_mut(FALLBACK_MODEL).unwrap();
            p.bias_mode = BiasMode::Continuation;
            p.require_vwap_flip = true;
            p.expected_vwap_relation = VwapRelation::Support;
        }
        let mut snap = MarketSnapshot {
            vwap_side: VwapSide::Above,
            vwap_slope: VwapSlope::Up,
            adx_now: 31.0,
            adx_sma3: 30.5,
            adx_sma6: 28.8,
            structural_shift: Some(Direction::Long),
            htf_bias: Bias::Bear,
            mid_bias: Bias::Bull,
            low_bias: Bias::Bull,
            bars_since_sweep: 5,
            micro_confirmation: true,
            ..MarketSnapshot::default()
        };
        let config = EngineConfig::default();
        prop_assert!(evaluate_with(&config, Direction::Long, &snap, &store).entry_ready);

        let broken = match which {
            0 => { snap.bars_since_sweep = 0; GateName::Delay }
            1 => { snap.structural_shift = Some(Direction::Short); GateName::StructuralShift }
            2 => { snap.vwap_side = VwapSide::Below; GateName::Vwap }
            3 => { snap.adx_now = 20.0; GateName::Adx }
            4 => { snap.mid_bias = Bias::Neutral; GateName::Bias }
            _ => { snap.micro_confirmation = false; GateName::Micro }
        };
        let result = evaluate_with(&config, Direction::Long, &snap, &store);
        prop_assert!(!result.entry_ready);
        prop_assert_eq!(result.gate_results.failed().collect::<Vec<_>>(), vec![broken]);
    }
}

// ── 4. Reset Idempotence ─────────────────────────────────────────────

proptest! {
    /// Resetting twice leaves the same state as resetting once.
    #[test]
    fn reset_is_idempotent(
        idx in 0..ARCHETYPES.len(),
        adx_min in 0.0..60.0_f64,
        delay in 0..20u32,
        flip in any::<bool>(),
        weights in arb_weights(),
    ) {
        let name = ARCHETYPES[idx];
        let mut store = ProfileStore::new();
        {
            let p = store.profile_mut(name).unwrap();
            p.adx_min = adx_min;
            p.post_sweep_delay_bars = delay;
            p.require_vwap_flip = flip;
            p.grade_weights = weights;
        }
        store.reset_to_default(name).unwrap();
        let once = store.clone();
        store.reset_to_default(name).unwrap();
        prop_assert_eq!(&store, &once);
        prop_assert_eq!(store.get(name).unwrap(), &store.defaults_for(name).unwrap());
    }
}

// ── 5. Restore Merge ─────────────────────────────────────────────────

proptest! {
    /// Only archetypes and fields present in the document change.
    #[test]
    fn restore_changes_only_named_keys(
        mask in proptest::collection::vec(any::<bool>(), ARCHETYPES.len()),
        adx_min in 10u32..40,
        mss in 0u32..50,
    ) {
        let mut store = ProfileStore::new();
        let before = store.clone();

        let mut doc = Map::new();
        for (name, &selected) in ARCHETYPES.iter().zip(&mask) {
            if selected {
                doc.insert(
                    name.to_string(),
                    json!({ "adx_min": adx_min, "grade_weights": { "mss": mss } }),
                );
            }
        }
        let merged = store.restore(&Value::Object(doc)).unwrap();
        prop_assert_eq!(merged.len(), mask.iter().filter(|&&m| m).count());

        for (name, &selected) in ARCHETYPES.iter().zip(&mask) {
            let old = before.get(name).unwrap();
            let new = store.get(name).unwrap();
            if selected {
                let expected = Profile {
                    adx_min: f64::from(adx_min),
                    grade_weights: GradeWeights {
                        structural_shift: mss,
                        ..old.grade_weights
                    },
                    ..old.clone()
                };
                prop_assert_eq!(new, &expected);
            } else {
                prop_assert_eq!(new, old);
            }
        }
    }
}
