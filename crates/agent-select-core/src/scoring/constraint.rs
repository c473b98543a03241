//! Hard constraint gate: mandatory subsets a candidate must fully contain.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::capability::{AgentCapabilities, Dimension};
use crate::profile::AgentProfile;
use crate::requirement::RoleRequirement;

/// A mandatory dimension the candidate does not fully cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub dimension: Dimension,
    pub missing: BTreeSet<String>,
}

/// Every mandatory dimension the candidate fails, in requirement order.
pub fn check_hard_constraints(
    requirement: &RoleRequirement,
    capabilities: &AgentCapabilities,
) -> Vec<ConstraintViolation> {
    requirement
        .mandatory()
        .into_iter()
        .filter_map(|(dimension, required)| {
            let held = capabilities.get(dimension);
            let missing: BTreeSet<String> = required.difference(held).cloned().collect();
            (!missing.is_empty()).then_some(ConstraintViolation { dimension, missing })
        })
        .collect()
}

/// `true` iff every mandatory set is a subset of the candidate's matching set.
pub fn passes_hard_constraints(
    requirement: &RoleRequirement,
    capabilities: &AgentCapabilities,
) -> bool {
    requirement
        .mandatory()
        .into_iter()
        .all(|(dimension, required)| required.is_subset(capabilities.get(dimension)))
}

/// Keep the candidates that pass every hard constraint, preserving pool order.
pub fn filter_eligible<'a>(
    requirement: &RoleRequirement,
    pool: &'a [AgentProfile],
) -> Vec<&'a AgentProfile> {
    pool.iter()
        .filter(|profile| {
            let eligible = passes_hard_constraints(requirement, &profile.capabilities);
            if !eligible {
                tracing::debug!(
                    agent_id = %profile.agent_id,
                    violations = ?check_hard_constraints(requirement, &profile.capabilities),
                    "candidate dropped by hard constraints"
                );
            }
            eligible
        })
        .collect()
}
