//! Selection orchestrator: filter, window, rank, decide, record.
//!
//! [`SelectionEngine`] holds no locks. `select` takes `&mut self`; callers that
//! share an engine across threads wrap it in their own `Mutex`. Separate
//! engines (one per tenant or role family) need no coordination.

use chrono::{DateTime, Utc};

use super::decision::{SelectionDecision, SelectionOutcome, SelectionRequest};
use crate::audit::{AuditSink, InMemoryAuditLog, OverrideRejection, RoundInput, SelectionRound};
use crate::config::ScoringConfig;
use crate::error::{SelectionError, SelectionResult};
use crate::metrics::METRICS;
use crate::obs::{self, RoundSpan};
use crate::profile::AgentProfile;
use crate::scoring::constraint::filter_eligible;
use crate::scoring::ranker::{order_by_base, rank_shortlist};

/// The `batch_index`-th window of `top_n` items. Empty past the end.
pub fn batch_window<T>(items: &[T], batch_index: usize, top_n: usize) -> &[T] {
    let start = batch_index.saturating_mul(top_n).min(items.len());
    let end = start.saturating_add(top_n).min(items.len());
    &items[start..end]
}

/// Single-authority decision maker for one role family.
#[derive(Debug)]
pub struct SelectionEngine<S: AuditSink = InMemoryAuditLog> {
    config: ScoringConfig,
    sink: S,
    next_sequence: u64,
}

impl SelectionEngine<InMemoryAuditLog> {
    /// Engine with an in-memory audit log.
    ///
    /// Returns [`SelectionError::InvalidConfig`] for a malformed config.
    pub fn new(config: ScoringConfig) -> SelectionResult<Self> {
        Self::with_sink(config, InMemoryAuditLog::new())
    }
}

impl<S: AuditSink> SelectionEngine<S> {
    /// Engine writing rounds to `sink`. Sequence numbers continue after any
    /// rounds the sink already holds.
    pub fn with_sink(config: ScoringConfig, sink: S) -> SelectionResult<Self> {
        config.validate()?;
        let next_sequence = sink.len() as u64 + 1;
        Ok(Self {
            config,
            sink,
            next_sequence,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Rounds in call order, optionally only the most recent `limit`.
    pub fn last_rounds(&self, limit: Option<usize>) -> SelectionResult<Vec<SelectionRound>> {
        self.sink.last_rounds(limit)
    }

    /// Run one round stamped with the current time.
    pub fn select(
        &mut self,
        request: &SelectionRequest,
        pool: &[AgentProfile],
    ) -> SelectionResult<SelectionOutcome> {
        self.select_at(request, pool, Utc::now())
    }

    /// Run one round stamped with `now`.
    ///
    /// Every call appends exactly one round to the sink, including empty
    /// rounds and rounds whose override is rejected. A rejected override
    /// returns [`SelectionError::InvalidOverride`] after the round is recorded.
    pub fn select_at(
        &mut self,
        request: &SelectionRequest,
        pool: &[AgentProfile],
        now: DateTime<Utc>,
    ) -> SelectionResult<SelectionOutcome> {
        let sequence = self.next_sequence;
        let _span = RoundSpan::enter(sequence, &request.role);
        let batch_index = request.batch_index;

        let eligible = filter_eligible(&request.requirement, pool);
        let eligible_count = eligible.len();
        let sorted = order_by_base(eligible);
        let shortlist = batch_window(&sorted, batch_index, self.config.top_n);
        let ranked = rank_shortlist(shortlist, &request.requirement, &self.config);

        let (decision, override_rejection) = match request.user_override.as_deref() {
            None => (
                SelectionDecision::system(ranked.first().cloned(), batch_index),
                None,
            ),
            Some(agent_id) => match ranked.iter().find(|r| r.agent_id == agent_id) {
                Some(chosen) => (SelectionDecision::user(chosen.clone(), batch_index), None),
                None => (
                    SelectionDecision::none(batch_index),
                    Some(OverrideRejection {
                        requested: agent_id.to_string(),
                        reason: format!(
                            "{agent_id} is not in the ranked output of batch {batch_index}"
                        ),
                    }),
                ),
            },
        };

        let round = SelectionRound::seal(RoundInput {
            sequence,
            role: request.role.clone(),
            requirement: request.requirement.clone(),
            batch_index,
            shortlist: shortlist.iter().map(|p| p.agent_id.clone()).collect(),
            ranked: ranked.clone(),
            decision: decision.clone(),
            override_rejection: override_rejection.clone(),
            recorded_at: now,
        })?;
        self.sink.append(&round)?;
        self.next_sequence += 1;

        METRICS.inc_rounds_recorded();
        if shortlist.is_empty() {
            METRICS.inc_empty_rounds();
            obs::emit_empty_round(sequence, &request.role, batch_index, eligible_count);
        }
        obs::emit_round_recorded(
            sequence,
            &request.role,
            batch_index,
            shortlist.len(),
            decision.selected_agent_id(),
            &decision.action.to_string(),
        );

        if let Some(rejection) = override_rejection {
            METRICS.inc_overrides_rejected();
            obs::emit_override_rejected(sequence, &request.role, &rejection.requested);
            return Err(SelectionError::InvalidOverride {
                agent_id: rejection.requested,
                round_sequence: sequence,
            });
        }
        if request.user_override.is_some() {
            METRICS.inc_overrides_applied();
        }

        Ok(SelectionOutcome {
            round_sequence: sequence,
            round_id: round.round_id,
            decision,
            ranked,
        })
    }
}
