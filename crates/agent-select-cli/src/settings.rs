//! TOML settings for the `agent-select` binary.
//!
//! ```toml
//! [scoring]
//! top_n = 5
//! requirement_weight = 0.4
//!
//! [base_weights]
//! performance = 0.5
//!
//! [cooling]
//! critical_cooling_days = 90
//! ```
//!
//! Every table and key is optional and falls back to the library defaults.

use std::path::Path;

use agent_select_core::{BaseWeights, CoolingRules, ScoringConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scoring: ScoringConfig,
    pub base_weights: BaseWeights,
    pub cooling: CoolingRules,
}

impl Settings {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        let settings = Self::from_toml(&raw)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let settings: Self = toml::from_str(raw).context("Failed to parse TOML")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.base_weights.validate()?;
        self.cooling.validate()?;
        Ok(())
    }
}
