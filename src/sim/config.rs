//! Simulation configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::regime::{Volatility, Volume};

use super::artifact::DEFAULT_ARTIFACT;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} domain must not be empty")]
    EmptyDomain(&'static str),
}

/// Configuration for a simulation run.
///
/// All knobs of the run live here rather than in globals, so tests can
/// inject a seed, a smaller iteration count, or restricted domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// The context block frozen at startup.
    #[serde(default = "default_artifact_text")]
    pub artifact_text: String,

    /// Number of simulated requests.
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Volatility values sampled uniformly each iteration.
    #[serde(default = "default_volatility_domain")]
    pub volatility_domain: Vec<Volatility>,

    /// Volume values sampled uniformly each iteration.
    #[serde(default = "default_volume_domain")]
    pub volume_domain: Vec<Volume>,

    /// Seed for the observation sampler. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_artifact_text() -> String {
    DEFAULT_ARTIFACT.to_string()
}

fn default_iterations() -> usize {
    5000
}

fn default_volatility_domain() -> Vec<Volatility> {
    Volatility::ALL.to_vec()
}

fn default_volume_domain() -> Vec<Volume> {
    Volume::ALL.to_vec()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            artifact_text: default_artifact_text(),
            iterations: default_iterations(),
            volatility_domain: default_volatility_domain(),
            volume_domain: default_volume_domain(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the sampling domains are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.volatility_domain.is_empty() {
            return Err(ConfigError::EmptyDomain("volatility"));
        }
        if self.volume_domain.is_empty() {
            return Err(ConfigError::EmptyDomain("volume"));
        }
        Ok(())
    }
}
