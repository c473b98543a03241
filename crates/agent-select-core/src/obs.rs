//! Structured observability hooks for selection rounds and score refreshes.
//!
//! This module provides:
//! - A round-scoped tracing span via the `RoundSpan` RAII guard
//! - Emission functions for round outcomes, override rejections and base refreshes
//!
//! Events are emitted at `info!` level, except override rejections which are
//! `warn!`. Filter with `RUST_LOG`.

use tracing::{info, warn};

/// RAII guard that enters a round-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = RoundSpan::enter(7, "reviewer");
/// // tracing calls are now tagged with round = 7, role = "reviewer"
/// ```
pub struct RoundSpan {
    _span: tracing::span::EnteredSpan,
}

impl RoundSpan {
    pub fn enter(sequence: u64, role: &str) -> Self {
        let span = tracing::info_span!("selection.round", round = sequence, role = %role);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a round was appended to the audit sink.
pub fn emit_round_recorded(
    sequence: u64,
    role: &str,
    batch_index: usize,
    shortlist_len: usize,
    selected: Option<&str>,
    action: &str,
) {
    info!(
        event = "selection.round_recorded",
        round = sequence,
        role = %role,
        batch_index = batch_index,
        shortlist_len = shortlist_len,
        selected = selected.unwrap_or("none"),
        action = %action,
    );
}

/// Emit event: the batch window held no candidates.
pub fn emit_empty_round(sequence: u64, role: &str, batch_index: usize, eligible: usize) {
    info!(
        event = "selection.empty_round",
        round = sequence,
        role = %role,
        batch_index = batch_index,
        eligible = eligible,
    );
}

/// Emit event: a user override named an agent outside the ranked output.
pub fn emit_override_rejected(sequence: u64, role: &str, requested: &str) {
    warn!(
        event = "selection.override_rejected",
        round = sequence,
        role = %role,
        requested = %requested,
    );
}

/// Emit event: a profile's cached base score was recomputed.
pub fn emit_base_refreshed(agent_id: &str, previous: f64, current: f64, fault_penalty: f64) {
    info!(
        event = "profile.base_refreshed",
        agent_id = %agent_id,
        previous = previous,
        current = current,
        fault_penalty = fault_penalty,
    );
}
