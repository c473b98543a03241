//! Scoring configuration for a selection engine.

use serde::{Deserialize, Serialize};

use crate::error::{SelectionError, SelectionResult};

/// Knobs that shape one engine's rankings.
///
/// Validated once when the engine is constructed; an invalid config never
/// reaches a selection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Shortlist size per batch.
    pub top_n: usize,
    /// Weight `w` of the requirement fit score; the base score gets `1 - w`.
    pub requirement_weight: f64,
    /// How many cold-start agents per shortlist receive the bonus.
    pub cold_start_quota: usize,
    pub cold_start_bonus: f64,
    /// Deducted from every cold-start agent beyond the quota.
    pub cold_start_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            requirement_weight: 0.4,
            cold_start_quota: 1,
            cold_start_bonus: 0.05,
            cold_start_penalty: 0.05,
        }
    }
}

impl ScoringConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_requirement_weight(mut self, weight: f64) -> Self {
        self.requirement_weight = weight;
        self
    }

    pub fn with_cold_start(mut self, quota: usize, bonus: f64, penalty: f64) -> Self {
        self.cold_start_quota = quota;
        self.cold_start_bonus = bonus;
        self.cold_start_penalty = penalty;
        self
    }

    pub fn validate(&self) -> SelectionResult<()> {
        if self.top_n == 0 {
            return Err(SelectionError::InvalidConfig(
                "top_n must be at least 1".to_string(),
            ));
        }
        if !self.requirement_weight.is_finite() || !(0.0..=1.0).contains(&self.requirement_weight)
        {
            return Err(SelectionError::InvalidConfig(format!(
                "requirement_weight must be within [0, 1] (got {})",
                self.requirement_weight
            )));
        }
        for (name, value) in [
            ("cold_start_bonus", self.cold_start_bonus),
            ("cold_start_penalty", self.cold_start_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SelectionError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Weight applied to the base score.
    pub fn base_weight(&self) -> f64 {
        1.0 - self.requirement_weight
    }
}
