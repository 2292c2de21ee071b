//! Structural-shift gate.

use crate::domain::GateName;

use super::{Gate, GateContext};

/// Passes when the confirmed shift points the desired way. No shift, no entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralShiftGate;

impl Gate for StructuralShiftGate {
    fn name(&self) -> GateName {
        GateName::StructuralShift
    }

    fn evaluate(&self, ctx: &GateContext<'_>) -> bool {
        ctx.snapshot.structural_shift == Some(ctx.desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::gates::test_support::{ctx, passing_pair};

    #[test]
    fn no_shift_never_matches() {
        let (mut snap, profile) = passing_pair();
        snap.structural_shift = None;
        let mut c = ctx(&snap, &profile);
        assert!(!StructuralShiftGate.evaluate(&c));
        c.desired = Direction::Short;
        assert!(!StructuralShiftGate.evaluate(&c));
    }

    #[test]
    fn opposite_shift_fails() {
        let (snap, profile) = passing_pair();
        let mut c = ctx(&snap, &profile);
        c.desired = Direction::Short;
        assert!(!StructuralShiftGate.evaluate(&c));
    }
}
