//! Global atomic counters for selection activity.
//!
//! Counters are incremented silently by the engine. Call [`Metrics::flush`]
//! to emit current values as a single `tracing::info!` event.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters, no allocations, no locking.
pub struct Metrics {
    rounds_recorded: AtomicU64,
    empty_rounds: AtomicU64,
    overrides_applied: AtomicU64,
    overrides_rejected: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            rounds_recorded: AtomicU64::new(0),
            empty_rounds: AtomicU64::new(0),
            overrides_applied: AtomicU64::new(0),
            overrides_rejected: AtomicU64::new(0),
        }
    }

    pub fn inc_rounds_recorded(&self) {
        self.rounds_recorded.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "rounds_recorded", "counter incremented");
    }

    pub fn inc_empty_rounds(&self) {
        self.empty_rounds.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "empty_rounds", "counter incremented");
    }

    pub fn inc_overrides_applied(&self) {
        self.overrides_applied.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "overrides_applied", "counter incremented");
    }

    pub fn inc_overrides_rejected(&self) {
        self.overrides_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "overrides_rejected", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            rounds_recorded = self.rounds_recorded(),
            empty_rounds = self.empty_rounds(),
            overrides_applied = self.overrides_applied(),
            overrides_rejected = self.overrides_rejected(),
        );
    }

    pub fn rounds_recorded(&self) -> u64 {
        self.rounds_recorded.load(Ordering::Relaxed)
    }

    pub fn empty_rounds(&self) -> u64 {
        self.empty_rounds.load(Ordering::Relaxed)
    }

    pub fn overrides_applied(&self) -> u64 {
        self.overrides_applied.load(Ordering::Relaxed)
    }

    pub fn overrides_rejected(&self) -> u64 {
        self.overrides_rejected.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.rounds_recorded.store(0, Ordering::Relaxed);
        self.empty_rounds.store(0, Ordering::Relaxed);
        self.overrides_applied.store(0, Ordering::Relaxed);
        self.overrides_rejected.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        m.inc_rounds_recorded();
        m.inc_rounds_recorded();
        m.inc_empty_rounds();
        m.inc_overrides_applied();
        m.inc_overrides_rejected();
        m.inc_overrides_rejected();

        assert_eq!(m.rounds_recorded(), 2);
        assert_eq!(m.empty_rounds(), 1);
        assert_eq!(m.overrides_applied(), 1);
        assert_eq!(m.overrides_rejected(), 2);
    }

    #[test]
    fn reset_zeroes_all() {
        let m = Metrics::new();
        m.inc_rounds_recorded();
        m.inc_empty_rounds();
        m.reset();
        assert_eq!(m.rounds_recorded(), 0);
        assert_eq!(m.empty_rounds(), 0);
    }
}
