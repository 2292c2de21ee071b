//! Profile store — one threshold profile per liquidity-model archetype.
//!
//! The store is an owned value injected into the evaluator, never a global.
//! Built-in defaults are frozen at construction; `reset_to_default` always
//! copies a complete profile back, so the store never holds a partial entry.
//!
//! Persistence is a single flat JSON document, overwritten wholesale on save
//! and merged field-by-field on restore.

pub mod adapt;
pub mod defaults;
mod document;

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::Profile;

pub use adapt::{AdaptField, AdaptPolicy, AdaptReport, SkipReason, SkippedField, SummaryRow};
pub use defaults::{ARCHETYPES, FALLBACK_MODEL};

/// Errors from profile lookup, reset and persistence.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("unknown liquidity model: {0}")]
    UnknownModel(String),
    #[error("no built-in default for liquidity model: {0}")]
    NoDefault(String),
    #[error("malformed profile document: {0}")]
    ConfigFormat(String),
    #[error("profile file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Named archetype profiles with frozen defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStore {
    order: Vec<String>,
    defaults: BTreeMap<String, Profile>,
    profiles: BTreeMap<String, Profile>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::with_defaults(defaults::builtin_profiles())
    }
}

impl ProfileStore {
    /// Store seeded with the built-in archetypes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a custom default set. Later duplicates replace earlier ones.
    pub fn with_defaults(seed: impl IntoIterator<Item = (String, Profile)>) -> Self {
        let mut order = Vec::new();
        let mut defaults = BTreeMap::new();
        for (name, profile) in seed {
            if defaults.insert(name.clone(), profile).is_none() {
                order.push(name);
            }
        }
        let profiles = defaults.clone();
        Self {
            order,
            defaults,
            profiles,
        }
    }

    pub fn get(&self, name: &str) -> Result<&Profile, ProfileError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ProfileError::UnknownModel(name.to_string()))
    }

    /// Mutable access for in-place tuning.
    pub fn profile_mut(&mut self, name: &str) -> Result<&mut Profile, ProfileError> {
        self.profiles
            .get_mut(name)
            .ok_or_else(|| ProfileError::UnknownModel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Archetype names in seeded order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.order
            .iter()
            .filter_map(|n| self.profiles.get(n).map(|p| (n.as_str(), p)))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Deep copy of the frozen default for `name`.
    pub fn defaults_for(&self, name: &str) -> Result<Profile, ProfileError> {
        self.defaults
            .get(name)
            .cloned()
            .ok_or_else(|| ProfileError::NoDefault(name.to_string()))
    }

    /// Replace `name` with a fresh copy of its default. Other entries are untouched.
    pub fn reset_to_default(&mut self, name: &str) -> Result<(), ProfileError> {
        let fresh = self.defaults_for(name)?;
        self.profiles.insert(name.to_string(), fresh);
        info!(model = %name, "profile reset to default");
        Ok(())
    }

    pub fn reset_all(&mut self) {
        self.profiles = self.defaults.clone();
        info!(count = self.profiles.len(), "all profiles reset to default");
    }

    /// Adapt thresholds from summary statistics with the default policy.
    pub fn bulk_adapt(&mut self, rows: &[SummaryRow]) -> AdaptReport {
        self.bulk_adapt_with(rows, &AdaptPolicy::default())
    }

    /// Adapt thresholds from summary statistics.
    ///
    /// Unknown archetypes and unparsable fields are skipped and listed in the report.
    pub fn bulk_adapt_with(&mut self, rows: &[SummaryRow], policy: &AdaptPolicy) -> AdaptReport {
        let mut report = AdaptReport {
            rows_seen: rows.len(),
            ..AdaptReport::default()
        };

        for (index, row) in rows.iter().enumerate() {
            let Some(name) = row.archetype() else {
                adapt::record_row_skip(&mut report, index, None, SkipReason::MissingArchetype);
                continue;
            };
            let Some(profile) = self.profiles.get_mut(name) else {
                adapt::record_row_skip(
                    &mut report,
                    index,
                    Some(name),
                    SkipReason::UnknownArchetype,
                );
                continue;
            };
            if adapt::adapt_profile(profile, row, index, name, policy, &mut report.skipped) {
                report.touch(name);
            }
        }

        for skip in &report.skipped {
            warn!(
                row = skip.row,
                archetype = skip.archetype.as_deref().unwrap_or("-"),
                field = ?skip.field,
                reason = %skip.reason,
                "summary row field skipped"
            );
        }
        info!(
            rows = report.rows_seen,
            updated = report.updated.len(),
            skipped = report.skipped.len(),
            "profiles adapted from summary statistics"
        );
        report
    }

    /// Whole-store document: `{archetype: {adx_min, post_sweep_delay, ...}}`.
    pub fn serialize(&self) -> serde_json::Value {
        document::to_document(self.iter())
    }

    /// Merge a document into the store.
    ///
    /// Only archetypes already in the store and fields present in the document
    /// change; unknown keys are ignored. The merge is all-or-nothing: a
    /// malformed field leaves the store untouched. Returns the merged names.
    pub fn restore(&mut self, doc: &serde_json::Value) -> Result<Vec<String>, ProfileError> {
        let mut staged = self.profiles.clone();
        let merged = document::merge_document(&mut staged, doc)?;
        self.profiles = staged;
        info!(merged = merged.len(), "profiles restored from document");
        Ok(merged)
    }

    /// Write the serialized store as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.serialize())?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "profiles saved");
        Ok(())
    }

    /// Restore from a saved file. Returns `Ok(false)` if the file does not exist.
    pub fn load(&mut self, path: &Path) -> Result<bool, ProfileError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let doc: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| ProfileError::ConfigFormat(e.to_string()))?;
        self.restore(&doc)?;
        Ok(true)
    }
}
