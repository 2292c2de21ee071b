//! Explicit sweep-presence gate.
//!
//! Only run under `SweepCredit::Explicit`; by default the sweep is assumed
//! to have been tagged upstream and is credited without a gate.

use crate::domain::GateName;

use super::{Gate, GateContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct SweepGate;

impl Gate for SweepGate {
    fn name(&self) -> GateName {
        GateName::Sweep
    }

    fn evaluate(&self, ctx: &GateContext<'_>) -> bool {
        ctx.snapshot.sweep_type.is_some()
    }
}
