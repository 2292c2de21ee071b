//! Post-sweep delay gate: waits out the profile's bar count after the sweep.

use crate::domain::GateName;

use super::{Gate, GateContext};

/// Passes once `bars_since_sweep >= profile.post_sweep_delay_bars`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayGate;

impl Gate for DelayGate {
    fn name(&self) -> GateName {
        GateName::Delay
    }

    fn evaluate(&self, ctx: &GateContext<'_>) -> bool {
        ctx.snapshot.bars_since_sweep >= ctx.profile.post_sweep_delay_bars
    }
}
