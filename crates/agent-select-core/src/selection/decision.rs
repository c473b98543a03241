//! Requests into and decisions out of a selection round.

use serde::{Deserialize, Serialize};

use crate::requirement::RoleRequirement;
use crate::scoring::ranker::CandidateRanking;

/// Who made the pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionAction {
    /// Top of the final order.
    System,
    /// A validated user override.
    User,
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Outcome of one round. `selected` is `None` for empty rounds and rejected overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionDecision {
    pub selected: Option<CandidateRanking>,
    pub action: DecisionAction,
    pub batch_index: usize,
}

impl SelectionDecision {
    pub fn system(selected: Option<CandidateRanking>, batch_index: usize) -> Self {
        Self {
            selected,
            action: DecisionAction::System,
            batch_index,
        }
    }

    pub fn user(selected: CandidateRanking, batch_index: usize) -> Self {
        Self {
            selected: Some(selected),
            action: DecisionAction::User,
            batch_index,
        }
    }

    pub fn none(batch_index: usize) -> Self {
        Self::system(None, batch_index)
    }

    pub fn is_none(&self) -> bool {
        self.selected.is_none()
    }

    pub fn selected_agent_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|r| r.agent_id.as_str())
    }
}

/// Input to one selection round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub role: String,
    pub requirement: RoleRequirement,
    #[serde(default)]
    pub batch_index: usize,
    #[serde(default)]
    pub user_override: Option<String>,
}

impl SelectionRequest {
    /// A first-batch request for the requirement's own role.
    pub fn new(requirement: RoleRequirement) -> Self {
        Self {
            role: requirement.role.clone(),
            requirement,
            batch_index: 0,
            user_override: None,
        }
    }

    pub fn with_batch(mut self, batch_index: usize) -> Self {
        self.batch_index = batch_index;
        self
    }

    pub fn with_override(mut self, agent_id: impl Into<String>) -> Self {
        self.user_override = Some(agent_id.into());
        self
    }

    /// The same request one batch further, without any override.
    ///
    /// This is how a caller rejects a shortlist and asks for the next one.
    pub fn next_batch(&self) -> Self {
        Self {
            role: self.role.clone(),
            requirement: self.requirement.clone(),
            batch_index: self.batch_index + 1,
            user_override: None,
        }
    }
}

/// What `select` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub round_sequence: u64,
    pub round_id: uuid::Uuid,
    pub decision: SelectionDecision,
    /// Final order of the shortlist, best first.
    pub ranked: Vec<CandidateRanking>,
}
