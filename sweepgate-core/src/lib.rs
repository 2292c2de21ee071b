//! Sweepgate Core — entry-readiness evaluation for liquidity-sweep setups.
//!
//! This crate contains the whole evaluation engine:
//! - Domain types (market snapshot, archetype profile, evaluation result)
//! - Profile store with frozen defaults, bulk adaptation and JSON persistence
//! - Independent entry gates and the weighted grader
//! - Context-driven model selector
//! - Orchestrator composing selection, gates, grade and banners
//! - Append-only CSV signal journal and TOML application config

pub mod config;
pub mod domain;
pub mod engine;
pub mod gates;
pub mod grader;
pub mod journal;
pub mod profiles;
pub mod selector;

pub use config::{ConfigError, PathsConfig, SweepgateConfig};
pub use domain::{Direction, EvaluationResult, MarketSnapshot, Profile};
pub use engine::{evaluate, evaluate_with, EngineConfig, SweepCredit};
pub use journal::{JournalError, SignalJournal, SignalRecord};
pub use profiles::{ProfileError, ProfileStore};
