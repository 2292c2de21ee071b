//! Built-in archetype profiles, frozen at store construction.

use crate::domain::{BiasMode, GradeWeights, Profile, VwapRelation};

pub const ASIA_LONDON_NY_CONTINUATION: &str = "Asia_London_NY_Continuation";
pub const LONDON_HIGH_REVERSAL: &str = "London_High_Reversal";
pub const PDH_PDL_TRAP: &str = "PDH_PDL_Trap";
pub const MIDSESSION_INTERNAL: &str = "MidSession_Internal";
pub const HTF_POI_SWEEP: &str = "HTF_POI_Sweep";
pub const NY_LOW_REVERSAL: &str = "NY_Low_Reversal";

/// Canonical archetype evaluation degrades to when a model is unknown.
pub const FALLBACK_MODEL: &str = ASIA_LONDON_NY_CONTINUATION;

/// Seeded archetypes in display order.
pub const ARCHETYPES: [&str; 6] = [
    ASIA_LONDON_NY_CONTINUATION,
    LONDON_HIGH_REVERSAL,
    PDH_PDL_TRAP,
    MIDSESSION_INTERNAL,
    HTF_POI_SWEEP,
    NY_LOW_REVERSAL,
];

fn profile(
    bias_mode: BiasMode,
    adx_min: f64,
    post_sweep_delay_bars: u32,
    require_vwap_flip: bool,
    expected_vwap_relation: VwapRelation,
    grade_weights: GradeWeights,
    notes: &str,
) -> Profile {
    Profile {
        bias_mode,
        adx_min,
        post_sweep_delay_bars,
        require_vwap_flip,
        expected_vwap_relation,
        close_confirm: false,
        grade_weights,
        notes: notes.to_string(),
    }
}

/// Default profile of [`FALLBACK_MODEL`].
pub fn fallback_profile() -> Profile {
    profile(
        BiasMode::Continuation,
        24.0,
        3,
        false,
        VwapRelation::Support,
        GradeWeights::new(30, 20, 20, 15, 15),
        "Asia/London sweep -> NY continuation. VWAP support; ADX above ~24; delay ~3.",
    )
}

/// The built-in profile set, one entry per name in [`ARCHETYPES`].
pub fn builtin_profiles() -> Vec<(String, Profile)> {
    use BiasMode::Reversal;
    use VwapRelation::{Flip, Reclaim, Resistance};

    vec![
        (ASIA_LONDON_NY_CONTINUATION.to_string(), fallback_profile()),
        (
            LONDON_HIGH_REVERSAL.to_string(),
            profile(
                Reversal,
                25.0,
                4,
                true,
                Resistance,
                GradeWeights::new(25, 20, 25, 15, 15),
                "London premium -> NY fade. VWAP rejection; bearish MSS.",
            ),
        ),
        (
            PDH_PDL_TRAP.to_string(),
            profile(
                Reversal,
                27.0,
                2,
                true,
                Flip,
                GradeWeights::new(35, 25, 15, 10, 15),
                "Prior day extreme trap; flip back through VWAP + MSS.",
            ),
        ),
        (
            MIDSESSION_INTERNAL.to_string(),
            profile(
                Reversal,
                24.0,
                1,
                true,
                Flip,
                GradeWeights::new(25, 20, 20, 20, 15),
                "IB high/low sweep 10:15-10:45 ET; micro-FVG + VWAP flip + MSS.",
            ),
        ),
        (
            HTF_POI_SWEEP.to_string(),
            profile(
                Reversal,
                20.0,
                4,
                true,
                Reclaim,
                GradeWeights::new(30, 15, 20, 20, 15),
                "HTF POI sweep (1H/4H). VWAP reclaim + structure shift.",
            ),
        ),
        (
            NY_LOW_REVERSAL.to_string(),
            profile(
                Reversal,
                20.0,
                3,
                true,
                Reclaim,
                GradeWeights::new(30, 20, 20, 20, 10),
                "NY sweeps the London (or prior) low, reclaims VWAP, then reverses long.",
            ),
        ),
    ]
}
