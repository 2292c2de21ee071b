//! Domain types for sweepgate: market vocabulary, snapshot input, profile, evaluation output.

pub mod market;
pub mod profile;
pub mod result;
pub mod snapshot;

pub use market::{Bias, Direction, ParseLabelError, Session, SweepType, VwapSide, VwapSlope};
pub use profile::{BiasMode, GradeWeights, Profile, VwapRelation};
pub use result::{Banner, EvaluationResult, GateName, GateResults};
pub use snapshot::MarketSnapshot;
