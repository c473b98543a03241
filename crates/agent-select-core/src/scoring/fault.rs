//! Fault history and its time-decaying penalty.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SelectionError, SelectionResult};

/// Severity tier of a recorded fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultSeverity {
    Minor,
    Major,
    Critical,
}

impl std::fmt::Display for FaultSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// One fault an agent was responsible for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultRecord {
    pub severity: FaultSeverity,
    pub occurred_at: DateTime<Utc>,
    pub cooling_period_days: u32,
}

impl FaultRecord {
    pub fn new(severity: FaultSeverity, occurred_at: DateTime<Utc>, cooling_period_days: u32) -> Self {
        Self {
            severity,
            occurred_at,
            cooling_period_days,
        }
    }

    /// A record is active while `occurred_at + cooling_period > now`.
    ///
    /// A cooling period that ends past the representable date range never ends.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.occurred_at
            .checked_add_signed(Duration::days(i64::from(self.cooling_period_days)))
            .map_or(true, |end| end > now)
    }
}

/// Severity deductions, the total cap, and default cooling periods.
///
/// Changing these values is one of the triggers for an external base-score refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoolingRules {
    pub minor_deduction: f64,
    pub major_deduction: f64,
    pub critical_deduction: f64,
    pub max_deduction: f64,
    pub minor_cooling_days: u32,
    pub major_cooling_days: u32,
    pub critical_cooling_days: u32,
}

impl Default for CoolingRules {
    fn default() -> Self {
        Self {
            minor_deduction: 0.05,
            major_deduction: 0.15,
            critical_deduction: 0.30,
            max_deduction: 1.0,
            minor_cooling_days: 7,
            major_cooling_days: 30,
            critical_cooling_days: 90,
        }
    }
}

impl CoolingRules {
    /// Fixed deduction for a single active record of `severity`.
    pub fn deduction(&self, severity: FaultSeverity) -> f64 {
        match severity {
            FaultSeverity::Minor => self.minor_deduction,
            FaultSeverity::Major => self.major_deduction,
            FaultSeverity::Critical => self.critical_deduction,
        }
    }

    /// Default cooling period for `severity`.
    pub fn cooling_days(&self, severity: FaultSeverity) -> u32 {
        match severity {
            FaultSeverity::Minor => self.minor_cooling_days,
            FaultSeverity::Major => self.major_cooling_days,
            FaultSeverity::Critical => self.critical_cooling_days,
        }
    }

    /// Build a record using the default cooling period for its severity.
    pub fn record(&self, severity: FaultSeverity, occurred_at: DateTime<Utc>) -> FaultRecord {
        FaultRecord::new(severity, occurred_at, self.cooling_days(severity))
    }

    pub fn validate(&self) -> SelectionResult<()> {
        let values = [
            ("minor_deduction", self.minor_deduction),
            ("major_deduction", self.major_deduction),
            ("critical_deduction", self.critical_deduction),
            ("max_deduction", self.max_deduction),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(SelectionError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if !(self.minor_deduction <= self.major_deduction
            && self.major_deduction <= self.critical_deduction)
        {
            return Err(SelectionError::InvalidConfig(
                "deductions must not decrease with severity".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ordered fault history for one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultLedger {
    records: Vec<FaultRecord>,
}

impl FaultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FaultRecord>) -> Self {
        Self { records }
    }

    pub fn record(&mut self, record: FaultRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FaultRecord] {
        &self.records
    }

    /// Lifetime record count, active or not. Only used for tie-breaking.
    pub fn total_fault_count(&self) -> usize {
        self.records.len()
    }

    /// Records still inside their cooling period at `now`.
    pub fn active_records(&self, now: DateTime<Utc>) -> impl Iterator<Item = &FaultRecord> {
        self.records.iter().filter(move |r| r.is_active_at(now))
    }

    /// Sum of severity deductions over active records, capped at `rules.max_deduction`.
    pub fn active_penalty(&self, rules: &CoolingRules, now: DateTime<Utc>) -> f64 {
        let raw: f64 = self
            .active_records(now)
            .map(|r| rules.deduction(r.severity))
            .sum();
        raw.min(rules.max_deduction)
    }
}
