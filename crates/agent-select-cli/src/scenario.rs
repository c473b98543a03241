//! JSON scenario files: one role requirement plus a candidate pool.
//!
//! A candidate carries an optional persisted `base`. Candidates without one
//! are onboarded at load time with the configured weights and cooling rules.

use std::path::Path;

use agent_select_core::{AgentProfile, BaseScore, ProfileDraft, RoleRequirement};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Role label recorded in the audit log. Defaults to the requirement's role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub requirement: RoleRequirement,
    #[serde(default)]
    pub candidates: Vec<CandidateEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateEntry {
    #[serde(flatten)]
    pub draft: ProfileDraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<BaseScore>,
}

impl CandidateEntry {
    pub fn from_profile(profile: &AgentProfile) -> Self {
        Self {
            draft: ProfileDraft {
                agent_id: profile.agent_id.clone(),
                role: profile.role.clone(),
                capabilities: profile.capabilities.clone(),
                static_score: profile.static_score,
                faults: profile.faults.clone(),
                last_success_at: profile.last_success_at,
                cold_start: profile.cold_start,
            },
            base: Some(*profile.base()),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid scenario JSON in {}", path.display()))
    }

    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or(&self.requirement.role)
    }

    /// Build the candidate pool, onboarding entries that have no stored base.
    pub fn profiles(&self, settings: &Settings, now: DateTime<Utc>) -> Result<Vec<AgentProfile>> {
        self.candidates
            .iter()
            .map(|entry| {
                entry.draft.static_score.validate().with_context(|| {
                    format!("Invalid static score for {}", entry.draft.agent_id)
                })?;
                match entry.base {
                    Some(base) => Ok(AgentProfile::restore(entry.draft.clone(), base)),
                    None => entry
                        .draft
                        .clone()
                        .onboard(&settings.base_weights, &settings.cooling, now)
                        .with_context(|| format!("Failed to onboard {}", entry.draft.agent_id)),
                }
            })
            .collect()
    }

    /// Replace the pool with `profiles`, persisting their bases.
    pub fn with_profiles(mut self, profiles: &[AgentProfile]) -> Self {
        self.candidates = profiles.iter().map(CandidateEntry::from_profile).collect();
        self
    }
}
