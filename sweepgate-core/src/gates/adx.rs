//! ADX trend-strength gate.
//!
//! Passes when ADX clears the stricter of the caller's and the profile's
//! floor AND the SMA3−SMA6 slope proxy clears the caller's slope minimum.

use crate::domain::GateName;

use super::{Gate, GateContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct AdxGate;

impl AdxGate {
    /// Effective ADX floor: max of caller override and profile.
    pub fn floor(ctx: &GateContext<'_>) -> f64 {
        ctx.snapshot.adx_min.max(ctx.profile.adx_min)
    }
}

impl Gate for AdxGate {
    fn name(&self) -> GateName {
        GateName::Adx
    }

    fn evaluate(&self, ctx: &GateContext<'_>) -> bool {
        let snap = ctx.snapshot;
        snap.adx_now >= Self::floor(ctx) && snap.adx_slope() >= snap.adx_slope_min
    }
}
