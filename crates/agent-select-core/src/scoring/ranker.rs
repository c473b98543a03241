//! Combined ranking: base and fit blended by weight, cold-start adjusted,
//! then totally ordered by a deterministic tie-break chain.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cold_start::{apply_cold_start, ColdStartAdjustment};
use super::fit::{score_fit, FitResult};
use crate::config::ScoringConfig;
use crate::profile::AgentProfile;
use crate::requirement::RoleRequirement;

/// Profile signals consulted when adjusted scores and fit are tied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TieBreakSignals {
    pub total_fault_count: usize,
    pub performance: f64,
    pub brand: f64,
    pub recognition: f64,
    pub last_success_at: Option<DateTime<Utc>>,
}

impl TieBreakSignals {
    pub fn from_profile(profile: &AgentProfile) -> Self {
        Self {
            total_fault_count: profile.total_fault_count(),
            performance: profile.static_score.performance,
            brand: profile.static_score.brand,
            recognition: profile.static_score.recognition,
            last_success_at: profile.last_success_at,
        }
    }
}

/// One shortlisted candidate with every score that went into its rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRanking {
    pub agent_id: String,
    /// Index within the batch window.
    pub shortlist_position: usize,
    pub cold_start: bool,
    pub base_value: f64,
    pub fit: FitResult,
    /// `(1 - w) * base + w * fit`
    pub combined_score: f64,
    pub adjustment: Option<ColdStartAdjustment>,
    /// `combined_score` plus any cold-start adjustment; the primary sort key.
    pub adjusted_score: f64,
    pub tie_break: TieBreakSignals,
}

/// Order the eligible pool by cached base value (desc), ties by agent id.
pub fn order_by_base(mut pool: Vec<&AgentProfile>) -> Vec<&AgentProfile> {
    pool.sort_by(|a, b| {
        b.base_value()
            .total_cmp(&a.base_value())
            .then_with(|| a.agent_id.cmp(&b.agent_id))
    });
    pool
}

/// Final-order comparator.
///
/// Adjusted score desc, then fit desc, then lifetime faults asc, then
/// performance, brand and recognition desc, then most recent success desc
/// with never-succeeded last.
pub fn compare_rankings(a: &CandidateRanking, b: &CandidateRanking) -> Ordering {
    b.adjusted_score
        .total_cmp(&a.adjusted_score)
        .then_with(|| b.fit.score.total_cmp(&a.fit.score))
        .then_with(|| {
            a.tie_break
                .total_fault_count
                .cmp(&b.tie_break.total_fault_count)
        })
        .then_with(|| b.tie_break.performance.total_cmp(&a.tie_break.performance))
        .then_with(|| b.tie_break.brand.total_cmp(&a.tie_break.brand))
        .then_with(|| b.tie_break.recognition.total_cmp(&a.tie_break.recognition))
        .then_with(|| b.tie_break.last_success_at.cmp(&a.tie_break.last_success_at))
}

/// Score a single shortlisted profile, before cold-start adjustment.
pub fn score_candidate(
    profile: &AgentProfile,
    position: usize,
    requirement: &RoleRequirement,
    config: &ScoringConfig,
) -> CandidateRanking {
    let fit = score_fit(requirement, &profile.capabilities);
    let base_value = profile.base_value();
    let combined_score =
        config.base_weight() * base_value + config.requirement_weight * fit.score;
    CandidateRanking {
        agent_id: profile.agent_id.clone(),
        shortlist_position: position,
        cold_start: profile.cold_start,
        base_value,
        fit,
        combined_score,
        adjustment: None,
        adjusted_score: combined_score,
        tie_break: TieBreakSignals::from_profile(profile),
    }
}

/// Rank a shortlist into its final order.
///
/// The sort is stable, so candidates tied on every key keep shortlist order.
pub fn rank_shortlist(
    shortlist: &[&AgentProfile],
    requirement: &RoleRequirement,
    config: &ScoringConfig,
) -> Vec<CandidateRanking> {
    let mut rankings: Vec<CandidateRanking> = shortlist
        .iter()
        .enumerate()
        .map(|(position, profile)| score_candidate(profile, position, requirement, config))
        .collect();

    apply_cold_start(&mut rankings, config);
    rankings.sort_by(compare_rankings);
    rankings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{AgentCapabilities, Dimension};
    use crate::profile::ProfileDraft;
    use crate::scoring::base::{BaseScore, StaticScore};
    use crate::scoring::fault::{FaultLedger, FaultRecord, FaultSeverity};
    use chrono::Duration;

    fn profile(id: &str, base: f64, static_score: (f64, f64, f64)) -> AgentProfile {
        let (p, b, r) = static_score;
        AgentProfile::restore(
            ProfileDraft::new(id, "coder", StaticScore::new(p, b, r).unwrap()),
            BaseScore {
                value: base,
                fault_penalty: 0.0,
                computed_at: Utc::now(),
            },
        )
    }

    fn ids(rankings: &[CandidateRanking]) -> Vec<&str> {
        rankings.iter().map(|r| r.agent_id.as_str()).collect()
    }

    #[test]
    fn test_order_by_base_breaks_ties_by_id() {
        let a = profile("b-agent", 0.5, (0.5, 0.5, 0.5));
        let b = profile("a-agent", 0.5, (0.5, 0.5, 0.5));
        let c = profile("c-agent", 0.9, (0.5, 0.5, 0.5));
        let ordered = order_by_base(vec![&a, &b, &c]);
        let ordered: Vec<&str> = ordered.iter().map(|p| p.agent_id.as_str()).collect();
        assert_eq!(ordered, vec!["c-agent", "a-agent", "b-agent"]);
    }

    #[test]
    fn test_combined_score_blends_base_and_fit() {
        let config = ScoringConfig::default().with_requirement_weight(0.25);
        let req = RoleRequirement::new("coder").with_skills(["rust", "go"]);
        let mut p = profile("a", 0.8, (0.5, 0.5, 0.5));
        p.capabilities = AgentCapabilities::new().with(Dimension::Skills, ["rust"]);

        let ranking = score_candidate(&p, 0, &req, &config);
        assert!((ranking.combined_score - (0.75 * 0.8 + 0.25 * 0.5)).abs() < 1e-9);
        assert_eq!(ranking.adjusted_score, ranking.combined_score);
    }

    #[test]
    fn test_fault_count_breaks_score_tie() {
        let config = ScoringConfig::default();
        let req = RoleRequirement::new("coder");
        let clean = profile("z-clean", 0.6, (0.5, 0.5, 0.5));
        let mut faulty = profile("a-faulty", 0.6, (0.5, 0.5, 0.5));
        faulty.faults = FaultLedger::from_records(vec![FaultRecord::new(
            FaultSeverity::Minor,
            Utc::now() - Duration::days(400),
            7,
        )]);

        let ranked = rank_shortlist(&[&faulty, &clean], &req, &config);
        assert_eq!(ids(&ranked), vec!["z-clean", "a-faulty"]);
    }

    #[test]
    fn test_static_components_break_remaining_ties_in_order() {
        let config = ScoringConfig::default();
        let req = RoleRequirement::new("coder");
        let by_brand = profile("x", 0.6, (0.5, 0.7, 0.1));
        let by_perf = profile("y", 0.6, (0.6, 0.1, 0.1));
        let by_recognition = profile("z", 0.6, (0.5, 0.7, 0.3));

        let ranked = rank_shortlist(&[&by_brand, &by_perf, &by_recognition], &req, &config);
        assert_eq!(ids(&ranked), vec!["y", "z", "x"]);
    }

    #[test]
    fn test_recent_success_breaks_final_tie_and_none_sorts_last() {
        let config = ScoringConfig::default();
        let req = RoleRequirement::new("coder");
        let now = Utc::now();
        let never = profile("a", 0.6, (0.5, 0.5, 0.5));
        let mut old = profile("b", 0.6, (0.5, 0.5, 0.5));
        old.last_success_at = Some(now - Duration::days(30));
        let mut recent = profile("c", 0.6, (0.5, 0.5, 0.5));
        recent.last_success_at = Some(now - Duration::days(1));

        let ranked = rank_shortlist(&[&never, &old, &recent], &req, &config);
        assert_eq!(ids(&ranked), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_fit_breaks_tie_when_adjusted_scores_match() {
        // With w = 0 the fit does not move the combined score, only the tie-break.
        let config = ScoringConfig::default().with_requirement_weight(0.0);
        let req = RoleRequirement::new("coder").with_skills(["rust"]);
        let unfit = profile("a", 0.6, (0.5, 0.5, 0.5));
        let mut fit = profile("b", 0.6, (0.5, 0.5, 0.5));
        fit.capabilities = AgentCapabilities::new().with(Dimension::Skills, ["rust"]);

        let ranked = rank_shortlist(&[&unfit, &fit], &req, &config);
        assert_eq!(ids(&ranked), vec!["b", "a"]);
    }
}
