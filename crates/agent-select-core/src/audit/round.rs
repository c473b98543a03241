//! Immutable, tamper-evident record of one selection round.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use uuid::Uuid;

use crate::error::{SelectionError, SelectionResult};
use crate::requirement::RoleRequirement;
use crate::scoring::ranker::CandidateRanking;
use crate::selection::decision::{DecisionAction, SelectionDecision};

/// Why a user override was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRejection {
    pub requested: String,
    pub reason: String,
}

/// One round as appended to the audit log.
///
/// `content_digest` is the SHA-256 hex of the canonical JSON of every other
/// field. [`SelectionRound::verify_integrity`] re-derives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRound {
    /// 1-based position in the engine's call sequence.
    pub sequence: u64,
    pub round_id: Uuid,
    pub role: String,
    pub requirement: RoleRequirement,
    pub batch_index: usize,
    /// Agent ids in the batch window, in base-score order.
    pub shortlist: Vec<String>,
    /// Final order.
    pub ranked: Vec<CandidateRanking>,
    pub decision: SelectionDecision,
    pub override_rejection: Option<OverrideRejection>,
    pub recorded_at: DateTime<Utc>,
    pub content_digest: String,
}

#[derive(Serialize)]
struct DigestView<'a> {
    sequence: u64,
    round_id: &'a Uuid,
    role: &'a str,
    requirement: &'a RoleRequirement,
    batch_index: usize,
    shortlist: &'a [String],
    ranked: &'a [CandidateRanking],
    decision: &'a SelectionDecision,
    override_rejection: &'a Option<OverrideRejection>,
    recorded_at: &'a DateTime<Utc>,
}

/// Everything needed to seal a round.
#[derive(Debug, Clone)]
pub struct RoundInput {
    pub sequence: u64,
    pub role: String,
    pub requirement: RoleRequirement,
    pub batch_index: usize,
    pub shortlist: Vec<String>,
    pub ranked: Vec<CandidateRanking>,
    pub decision: SelectionDecision,
    pub override_rejection: Option<OverrideRejection>,
    pub recorded_at: DateTime<Utc>,
}

impl SelectionRound {
    /// Assign a round id and compute the content digest.
    pub fn seal(input: RoundInput) -> SelectionResult<Self> {
        let mut round = Self {
            sequence: input.sequence,
            round_id: Uuid::new_v4(),
            role: input.role,
            requirement: input.requirement,
            batch_index: input.batch_index,
            shortlist: input.shortlist,
            ranked: input.ranked,
            decision: input.decision,
            override_rejection: input.override_rejection,
            recorded_at: input.recorded_at,
            content_digest: String::new(),
        };
        round.content_digest = round.compute_digest()?;
        Ok(round)
    }

    fn compute_digest(&self) -> SelectionResult<String> {
        let view = DigestView {
            sequence: self.sequence,
            round_id: &self.round_id,
            role: &self.role,
            requirement: &self.requirement,
            batch_index: self.batch_index,
            shortlist: &self.shortlist,
            ranked: &self.ranked,
            decision: &self.decision,
            override_rejection: &self.override_rejection,
            recorded_at: &self.recorded_at,
        };
        let bytes = serde_json::to_vec(&view)?;
        Ok(hex::encode(sha2::Sha256::digest(&bytes)))
    }

    /// Returns [`SelectionError::DigestMismatch`] if any field changed after sealing.
    pub fn verify_integrity(&self) -> SelectionResult<()> {
        let computed = self.compute_digest()?;
        if computed != self.content_digest {
            return Err(SelectionError::DigestMismatch {
                expected: self.content_digest.clone(),
                actual: computed,
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.shortlist.is_empty()
    }
}

/// Flat view of a round for audit displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub sequence: u64,
    pub role: String,
    pub batch_index: usize,
    pub shortlist_size: usize,
    pub selected: Option<String>,
    pub action: DecisionAction,
    pub outcome: String,
}

impl RoundSummary {
    pub fn from_round(round: &SelectionRound) -> Self {
        let selected = round.decision.selected_agent_id().map(str::to_string);
        let outcome = match (&round.override_rejection, &selected) {
            (Some(rejection), _) => format!("override rejected: {}", rejection.reason),
            (None, Some(agent)) => format!("selected {agent} ({})", round.decision.action),
            (None, None) => "no eligible candidates in batch".to_string(),
        };
        Self {
            sequence: round.sequence,
            role: round.role.clone(),
            batch_index: round.batch_index,
            shortlist_size: round.shortlist.len(),
            selected,
            action: round.decision.action,
            outcome,
        }
    }
}
