//! Micro-confirmation gate (e.g. a 1m fair-value gap printed).

use crate::domain::GateName;

use super::{Gate, GateContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct MicroGate;

impl Gate for MicroGate {
    fn name(&self) -> GateName {
        GateName::Micro
    }

    fn evaluate(&self, ctx: &GateContext<'_>) -> bool {
        ctx.snapshot.micro_confirmation
    }
}
