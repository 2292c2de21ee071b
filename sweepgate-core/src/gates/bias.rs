//! Multi-timeframe bias alignment gate.

use crate::domain::{BiasMode, GateName};

use super::{Gate, GateContext};

/// Mid and low timeframe bias must both match the trade direction.
/// In reversal mode the HTF must additionally differ from that aligned bias.
/// Disagreeing mid/low biases fail in both modes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiasGate;

impl Gate for BiasGate {
    fn name(&self) -> GateName {
        GateName::Bias
    }

    fn evaluate(&self, ctx: &GateContext<'_>) -> bool {
        let snap = ctx.snapshot;
        let aligned = ctx.desired.aligned_bias();
        if snap.mid_bias != aligned || snap.low_bias != aligned {
            return false;
        }
        match ctx.profile.bias_mode {
            BiasMode::Continuation => true,
            BiasMode::Reversal => snap.htf_bias != aligned,
        }
    }
}
