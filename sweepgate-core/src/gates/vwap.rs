//! VWAP condition gate.
//!
//! - support: price above VWAP
//! - resistance: price below VWAP
//! - flip / reclaim: VWAP sloping either way (side unconstrained); profiles
//!   with `close_confirm` also need a confirmed close through VWAP
//!
//! Profiles that do not require the VWAP condition always pass.

use crate::domain::{GateName, MarketSnapshot, VwapRelation, VwapSide};

use super::{Gate, GateContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct VwapGate;

/// The relation check alone, ignoring whether the profile requires it.
pub fn relation_holds(
    expected: VwapRelation,
    snapshot: &MarketSnapshot,
    close_confirm: bool,
) -> bool {
    match expected {
        VwapRelation::Support => snapshot.vwap_side == VwapSide::Above,
        VwapRelation::Resistance => snapshot.vwap_side == VwapSide::Below,
        VwapRelation::Flip | VwapRelation::Reclaim => {
            snapshot.vwap_slope.is_trending() && (!close_confirm || snapshot.close_confirmed)
        }
    }
}

impl Gate for VwapGate {
    fn name(&self) -> GateName {
        GateName::Vwap
    }

    fn evaluate(&self, ctx: &GateContext<'_>) -> bool {
        let profile = ctx.profile;
        if !profile.require_vwap_flip {
            return true;
        }
        relation_holds(
            profile.expected_vwap_relation,
            ctx.snapshot,
            profile.close_confirm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VwapSlope;
    use crate::gates::test_support::{ctx, passing_pair};

    #[test]
    fn not_required_short_circuits() {
        let (mut snap, profile) = passing_pair();
        assert!(!profile.require_vwap_flip);
        snap.vwap_side = VwapSide::Below;
        snap.vwap_slope = VwapSlope::Flat;
        assert!(VwapGate.evaluate(&ctx(&snap, &profile)));
    }

    #[test]
    fn support_and_resistance_check_side() {
        let (mut snap, mut profile) = passing_pair();
        profile.require_vwap_flip = true;

        profile.expected_vwap_relation = VwapRelation::Support;
        assert!(VwapGate.evaluate(&ctx(&snap, &profile)));
        snap.vwap_side = VwapSide::Touching;
        assert!(!VwapGate.evaluate(&ctx(&snap, &profile)));

        profile.expected_vwap_relation = VwapRelation::Resistance;
        assert!(!VwapGate.evaluate(&ctx(&snap, &profile)));
        snap.vwap_side = VwapSide::Below;
        assert!(VwapGate.evaluate(&ctx(&snap, &profile)));
    }

    #[test]
    fn flip_and_reclaim_need_a_trending_vwap_on_either_side() {
        let (mut snap, mut profile) = passing_pair();
        profile.require_vwap_flip = true;
        for relation in [VwapRelation::Flip, VwapRelation::Reclaim] {
            profile.expected_vwap_relation = relation;
            for side in [VwapSide::Above, VwapSide::Below, VwapSide::Touching] {
                snap.vwap_side = side;
                snap.vwap_slope = VwapSlope::Down;
                assert!(VwapGate.evaluate(&ctx(&snap, &profile)));
                snap.vwap_slope = VwapSlope::Flat;
                assert!(!VwapGate.evaluate(&ctx(&snap, &profile)));
            }
        }
    }

    #[test]
    fn close_confirm_tightens_flip_only() {
        let (mut snap, mut profile) = passing_pair();
        profile.require_vwap_flip = true;
        profile.close_confirm = true;
        snap.close_confirmed = false;

        profile.expected_vwap_relation = VwapRelation::Reclaim;
        assert!(!VwapGate.evaluate(&ctx(&snap, &profile)));
        snap.close_confirmed = true;
        assert!(VwapGate.evaluate(&ctx(&snap, &profile)));

        snap.close_confirmed = false;
        profile.expected_vwap_relation = VwapRelation::Support;
        assert!(VwapGate.evaluate(&ctx(&snap, &profile)));
    }
}
