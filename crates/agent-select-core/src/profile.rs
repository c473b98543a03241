//! Agent profiles and the explicit base-score refresh entry point.
//!
//! A profile's cached [`BaseScore`] is written in exactly two places: when the
//! profile is onboarded and when [`refresh_base`] is called. Selection reads it
//! through [`AgentProfile::base_value`] and never recomputes it, so the base
//! value cannot drift between two selection calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capability::AgentCapabilities;
use crate::error::SelectionResult;
use crate::obs;
use crate::scoring::base::{recompute_base, BaseScore, BaseWeights, StaticScore};
use crate::scoring::fault::{CoolingRules, FaultLedger, FaultRecord};

/// Everything about an agent except its cached base score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub agent_id: String,
    pub role: String,
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    pub static_score: StaticScore,
    #[serde(default)]
    pub faults: FaultLedger,
    #[serde(default)]
    pub last_success_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cold_start: bool,
}

impl ProfileDraft {
    pub fn new(agent_id: impl Into<String>, role: impl Into<String>, static_score: StaticScore) -> Self {
        Self {
            agent_id: agent_id.into(),
            role: role.into(),
            capabilities: AgentCapabilities::default(),
            static_score,
            faults: FaultLedger::default(),
            last_success_at: None,
            cold_start: false,
        }
    }

    pub fn with_capabilities(mut self, capabilities: AgentCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_faults(mut self, faults: FaultLedger) -> Self {
        self.faults = faults;
        self
    }

    pub fn with_last_success(mut self, at: DateTime<Utc>) -> Self {
        self.last_success_at = Some(at);
        self
    }

    pub fn cold_start(mut self, cold_start: bool) -> Self {
        self.cold_start = cold_start;
        self
    }

    /// Compute the initial base score and produce the profile.
    pub fn onboard(
        self,
        weights: &BaseWeights,
        rules: &CoolingRules,
        now: DateTime<Utc>,
    ) -> SelectionResult<AgentProfile> {
        let base = recompute_base(&self.static_score, weights, &self.faults, rules, now)?;
        Ok(AgentProfile::restore(self, base))
    }
}

/// A candidate agent as seen by the selection engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub agent_id: String,
    pub role: String,
    pub capabilities: AgentCapabilities,
    pub static_score: StaticScore,
    pub faults: FaultLedger,
    pub last_success_at: Option<DateTime<Utc>>,
    pub cold_start: bool,
    base: BaseScore,
}

impl AgentProfile {
    /// Rebuild a profile from externally persisted parts without recomputing.
    pub fn restore(draft: ProfileDraft, base: BaseScore) -> Self {
        Self {
            agent_id: draft.agent_id,
            role: draft.role,
            capabilities: draft.capabilities,
            static_score: draft.static_score,
            faults: draft.faults,
            last_success_at: draft.last_success_at,
            cold_start: draft.cold_start,
            base,
        }
    }

    /// The cached base snapshot.
    pub fn base(&self) -> &BaseScore {
        &self.base
    }

    /// The cached base value used for ranking.
    pub fn base_value(&self) -> f64 {
        self.base.value
    }

    /// Append a fault. The cached base value is unchanged until the next refresh.
    pub fn record_fault(&mut self, record: FaultRecord) {
        self.faults.record(record);
    }

    pub fn total_fault_count(&self) -> usize {
        self.faults.total_fault_count()
    }
}

/// Recompute and replace a profile's cached base score.
///
/// Called by the profile-management side on creation, after new faults, or
/// when weights or cooling rules change. The selection engine never calls this.
pub fn refresh_base(
    profile: &mut AgentProfile,
    weights: &BaseWeights,
    rules: &CoolingRules,
    now: DateTime<Utc>,
) -> SelectionResult<BaseScore> {
    let previous = profile.base.value;
    let base = recompute_base(&profile.static_score, weights, &profile.faults, rules, now)?;
    profile.base = base;
    obs::emit_base_refreshed(&profile.agent_id, previous, base.value, base.fault_penalty);
    Ok(base)
}
