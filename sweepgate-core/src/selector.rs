//! Model selector — context-driven override of the requested archetype.
//!
//! Some session/sweep/direction combinations are dominated by one archetype.
//! Rules are tried in order; the first whose target exists in the store wins.
//! Otherwise the requested model is used unchanged.

use crate::domain::{Direction, Session, SweepType};
use crate::profiles::defaults::{
    ASIA_LONDON_NY_CONTINUATION, LONDON_HIGH_REVERSAL, NY_LOW_REVERSAL,
};
use crate::profiles::ProfileStore;

struct Rule {
    target: &'static str,
    applies: fn(Session, SweepType, Direction) -> bool,
}

fn ny_low_long(session: Session, sweep: SweepType, desired: Direction) -> bool {
    session == Session::Ny && sweep.is_reference_low() && desired == Direction::Long
}

fn ny_high_short(session: Session, sweep: SweepType, desired: Direction) -> bool {
    session == Session::Ny && sweep.is_reference_high() && desired == Direction::Short
}

fn ny_after_asia(session: Session, sweep: SweepType, _: Direction) -> bool {
    session == Session::Ny && sweep.is_asia_extreme()
}

const RULES: [Rule; 3] = [
    Rule {
        target: NY_LOW_REVERSAL,
        applies: ny_low_long,
    },
    Rule {
        target: LONDON_HIGH_REVERSAL,
        applies: ny_high_short,
    },
    Rule {
        target: ASIA_LONDON_NY_CONTINUATION,
        applies: ny_after_asia,
    },
];

/// Archetype implied by context alone, if any rule matches.
pub fn recommend_model(
    store: &ProfileStore,
    session: Session,
    sweep_type: Option<SweepType>,
    desired: Direction,
) -> Option<&'static str> {
    let sweep = sweep_type.unwrap_or(SweepType::Other);
    RULES
        .iter()
        .filter(|rule| (rule.applies)(session, sweep, desired))
        .map(|rule| rule.target)
        .find(|target| store.contains(target))
}

/// Effective archetype for one evaluation.
pub fn select_model(
    store: &ProfileStore,
    session: Session,
    sweep_type: Option<SweepType>,
    desired: Direction,
    requested: &str,
) -> String {
    recommend_model(store, session, sweep_type, desired)
        .unwrap_or(requested)
        .to_string()
}
