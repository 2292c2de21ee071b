//! Entry gates — independent boolean preconditions over one snapshot.
//!
//! Every gate sees the same [`GateContext`] (snapshot, effective profile,
//! desired direction) and nothing else, so no gate can depend on another's
//! outcome. Readiness is the AND of all modeled gates.

pub mod adx;
pub mod bias;
pub mod delay;
pub mod micro;
pub mod structure;
pub mod sweep;
pub mod vwap;

use crate::domain::{Direction, GateName, MarketSnapshot, Profile};

pub use adx::AdxGate;
pub use bias::BiasGate;
pub use delay::DelayGate;
pub use micro::MicroGate;
pub use structure::StructuralShiftGate;
pub use sweep::SweepGate;
pub use vwap::VwapGate;

/// Inputs shared by all gates for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct GateContext<'a> {
    pub snapshot: &'a MarketSnapshot,
    pub profile: &'a Profile,
    pub desired: Direction,
}

/// A pure predicate over the evaluation context.
///
/// # Architecture invariant
/// Gates must not consult other gates' results.
pub trait Gate: Send + Sync {
    fn name(&self) -> GateName;

    fn evaluate(&self, ctx: &GateContext<'_>) -> bool;
}

/// The gates every evaluation runs, in reporting order.
pub fn standard_gates() -> [&'static dyn Gate; 6] {
    [
        &DelayGate,
        &StructuralShiftGate,
        &VwapGate,
        &AdxGate,
        &BiasGate,
        &MicroGate,
    ]
}
