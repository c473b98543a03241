//! Base fitness score: a weighted static score minus the active fault penalty.
//!
//! The base value is computed by [`recompute_base`] and cached on the agent
//! profile. Selection only reads the cached value; recomputation is an explicit
//! step owned by whoever manages profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fault::{CoolingRules, FaultLedger};
use crate::error::{SelectionError, SelectionResult};

/// Raw static components, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticScore {
    pub performance: f64,
    pub brand: f64,
    pub recognition: f64,
}

impl StaticScore {
    /// Construct a validated static score.
    pub fn new(performance: f64, brand: f64, recognition: f64) -> SelectionResult<Self> {
        let score = Self {
            performance,
            brand,
            recognition,
        };
        score.validate()?;
        Ok(score)
    }

    pub fn validate(&self) -> SelectionResult<()> {
        for (name, value) in [
            ("performance", self.performance),
            ("brand", self.brand),
            ("recognition", self.recognition),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SelectionError::InvalidScore(format!(
                    "{name} must be within [0, 1] (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// Relative weights of the static components. Normalized by their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseWeights {
    pub performance: f64,
    pub brand: f64,
    pub recognition: f64,
}

impl Default for BaseWeights {
    fn default() -> Self {
        Self {
            performance: 0.5,
            brand: 0.3,
            recognition: 0.2,
        }
    }
}

impl BaseWeights {
    pub fn validate(&self) -> SelectionResult<()> {
        let parts = [self.performance, self.brand, self.recognition];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SelectionError::InvalidScore(
                "base weights must be finite and non-negative".to_string(),
            ));
        }
        if parts.iter().sum::<f64>() <= 0.0 {
            return Err(SelectionError::InvalidScore(
                "base weights must not all be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Weighted mean of the static components.
    pub fn combine(&self, score: &StaticScore) -> f64 {
        let total = self.performance + self.brand + self.recognition;
        (self.performance * score.performance
            + self.brand * score.brand
            + self.recognition * score.recognition)
            / total
    }
}

/// Cached base value together with the inputs snapshot it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseScore {
    /// Weighted static score minus `fault_penalty`.
    pub value: f64,
    /// Active fault penalty at `computed_at`.
    pub fault_penalty: f64,
    pub computed_at: DateTime<Utc>,
}

/// Compute a fresh base score.
///
/// Pure: the result depends only on the arguments. `now` decides which fault
/// records are still cooling.
pub fn recompute_base(
    static_inputs: &StaticScore,
    weights: &BaseWeights,
    ledger: &FaultLedger,
    rules: &CoolingRules,
    now: DateTime<Utc>,
) -> SelectionResult<BaseScore> {
    static_inputs.validate()?;
    weights.validate()?;

    let fault_penalty = ledger.active_penalty(rules, now);
    Ok(BaseScore {
        value: weights.combine(static_inputs) - fault_penalty,
        fault_penalty,
        computed_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::fault::FaultSeverity;
    use chrono::Duration;

    #[test]
    fn test_weights_are_normalized() {
        let weights = BaseWeights {
            performance: 2.0,
            brand: 1.0,
            recognition: 1.0,
        };
        let score = StaticScore::new(1.0, 0.0, 0.0).unwrap();
        assert!((weights.combine(&score) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_recompute_subtracts_active_penalty() {
        let now = Utc::now();
        let rules = CoolingRules::default();
        let mut ledger = FaultLedger::new();
        ledger.record(rules.record(FaultSeverity::Critical, now - Duration::days(1)));

        let score = StaticScore::new(0.8, 0.8, 0.8).unwrap();
        let base = recompute_base(&score, &BaseWeights::default(), &ledger, &rules, now).unwrap();

        assert!((base.fault_penalty - 0.30).abs() < 1e-9);
        assert!((base.value - 0.50).abs() < 1e-9);
        assert_eq!(base.computed_at, now);
    }

    #[test]
    fn test_recompute_ignores_cooled_faults() {
        let now = Utc::now();
        let rules = CoolingRules::default();
        let mut ledger = FaultLedger::new();
        ledger.record(rules.record(FaultSeverity::Critical, now - Duration::days(120)));

        let score = StaticScore::new(0.6, 0.6, 0.6).unwrap();
        let base = recompute_base(&score, &BaseWeights::default(), &ledger, &rules, now).unwrap();
        assert_eq!(base.fault_penalty, 0.0);
        assert!((base.value - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_static_score_out_of_range_is_rejected() {
        assert!(matches!(
            StaticScore::new(1.2, 0.5, 0.5),
            Err(SelectionError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_zero_weights_are_rejected() {
        let weights = BaseWeights {
            performance: 0.0,
            brand: 0.0,
            recognition: 0.0,
        };
        assert!(weights.validate().is_err());
    }
}
