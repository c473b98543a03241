//! Audit sink abstraction and the default in-memory log.

use super::round::SelectionRound;
use crate::error::SelectionResult;

/// Destination for selection rounds.
///
/// Implementations must be append-only: rounds are never rewritten or removed,
/// and `last_rounds` returns them in append order.
pub trait AuditSink {
    /// Append one round.
    fn append(&mut self, round: &SelectionRound) -> SelectionResult<()>;

    /// Number of rounds recorded so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All rounds in call order, or only the most recent `limit`.
    fn last_rounds(&self, limit: Option<usize>) -> SelectionResult<Vec<SelectionRound>>;
}

/// Keep the most recent `limit` items, preserving order.
pub(crate) fn tail<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        let skip = items.len().saturating_sub(limit);
        items.drain(..skip);
    }
    items
}

/// Append-only in-process history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    rounds: Vec<SelectionRound>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the full history without cloning.
    pub fn rounds(&self) -> &[SelectionRound] {
        &self.rounds
    }
}

impl AuditSink for InMemoryAuditLog {
    fn append(&mut self, round: &SelectionRound) -> SelectionResult<()> {
        self.rounds.push(round.clone());
        Ok(())
    }

    fn len(&self) -> usize {
        self.rounds.len()
    }

    fn last_rounds(&self, limit: Option<usize>) -> SelectionResult<Vec<SelectionRound>> {
        let start = limit.map_or(0, |l| self.rounds.len().saturating_sub(l));
        Ok(self.rounds[start..].to_vec())
    }
}
