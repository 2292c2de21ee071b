//! Application configuration (`sweepgate.toml`).
//!
//! Every table is optional; an absent file means all defaults.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineConfig;
use crate::profiles::{AdaptPolicy, ARCHETYPES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Persisted profile document (JSON).
    pub profiles: PathBuf,
    /// Signal journal (CSV).
    pub journal: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            profiles: PathBuf::from("config/sweep_profiles.json"),
            journal: PathBuf::from("logs/signal_log.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepgateConfig {
    pub engine: EngineConfig,
    pub paths: PathsConfig,
    pub adapt: AdaptPolicy,
}

impl SweepgateConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ARCHETYPES.contains(&self.engine.fallback_model.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "engine.fallback_model `{}` is not a built-in archetype",
                self.engine.fallback_model
            )));
        }
        let adapt = &self.adapt;
        if !adapt.adx_floor.is_finite() || !adapt.adx_margin.is_finite() {
            return Err(ConfigError::Invalid(
                "adapt.adx_floor and adapt.adx_margin must be finite".into(),
            ));
        }
        Ok(())
    }
}
