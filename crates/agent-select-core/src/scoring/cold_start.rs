//! Quota-bounded exposure control for newly onboarded agents.

use serde::{Deserialize, Serialize};

use super::ranker::CandidateRanking;
use crate::config::ScoringConfig;

/// Adjustment applied to a cold-start candidate's combined score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColdStartAdjustment {
    /// Within quota.
    Bonus { amount: f64 },
    /// Beyond quota.
    OverflowPenalty { amount: f64 },
}

impl ColdStartAdjustment {
    /// Signed change to the combined score.
    pub fn delta(&self) -> f64 {
        match self {
            Self::Bonus { amount } => *amount,
            Self::OverflowPenalty { amount } => -*amount,
        }
    }
}

/// Apply cold-start adjustments in place.
///
/// Cold-start members are ordered by pre-adjustment combined score (desc),
/// ties by shortlist position. The first `cold_start_quota` get the bonus, the
/// rest the overflow penalty. Other members are left untouched.
pub fn apply_cold_start(rankings: &mut [CandidateRanking], config: &ScoringConfig) {
    let mut cold: Vec<usize> = rankings
        .iter()
        .enumerate()
        .filter(|(_, r)| r.cold_start)
        .map(|(i, _)| i)
        .collect();

    cold.sort_by(|&a, &b| {
        rankings[b]
            .combined_score
            .total_cmp(&rankings[a].combined_score)
            .then_with(|| rankings[a].shortlist_position.cmp(&rankings[b].shortlist_position))
    });

    for (rank, idx) in cold.into_iter().enumerate() {
        let adjustment = if rank < config.cold_start_quota {
            ColdStartAdjustment::Bonus {
                amount: config.cold_start_bonus,
            }
        } else {
            ColdStartAdjustment::OverflowPenalty {
                amount: config.cold_start_penalty,
            }
        };
        let ranking = &mut rankings[idx];
        ranking.adjustment = Some(adjustment);
        ranking.adjusted_score = ranking.combined_score + adjustment.delta();
    }
}
