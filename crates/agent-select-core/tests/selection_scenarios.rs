use agent_select_core::{
    AgentCapabilities, AgentProfile, BaseWeights, ColdStartAdjustment, CoolingRules,
    DecisionAction, Dimension, FaultLedger, FaultSeverity, ProfileDraft, RoleRequirement,
    ScoringConfig, SelectionEngine, SelectionRequest, StaticScore,
};
use chrono::{DateTime, Duration, Utc};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-05-04T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn onboard(draft: ProfileDraft) -> AgentProfile {
    draft
        .onboard(&BaseWeights::default(), &CoolingRules::default(), now())
        .expect("onboard")
}

fn draft(id: &str, score: f64) -> ProfileDraft {
    ProfileDraft::new(id, "coder", StaticScore::new(score, score, score).unwrap())
}

fn ids(ranked: &[agent_select_core::CandidateRanking]) -> Vec<&str> {
    ranked.iter().map(|r| r.agent_id.as_str()).collect()
}

#[test]
fn active_critical_fault_ranks_below_fault_free_twin() {
    let rules = CoolingRules::default();
    let caps = AgentCapabilities::new()
        .with(Dimension::Skills, ["rust"])
        .with(Dimension::Tools, ["docker"]);

    let clean = onboard(draft("agent-b", 0.7).with_capabilities(caps.clone()));
    let mut ledger = FaultLedger::new();
    ledger.record(rules.record(FaultSeverity::Critical, now() - Duration::days(3)));
    let faulty = onboard(
        draft("agent-a", 0.7)
            .with_capabilities(caps)
            .with_faults(ledger),
    );

    let requirement = RoleRequirement::new("coder")
        .with_skills(["rust"])
        .with_tools(["docker"]);
    let mut engine = SelectionEngine::new(ScoringConfig::default()).unwrap();
    let outcome = engine
        .select_at(&SelectionRequest::new(requirement), &[faulty, clean], now())
        .unwrap();

    assert_eq!(outcome.ranked[0].fit.score, outcome.ranked[1].fit.score);
    assert_eq!(ids(&outcome.ranked), vec!["agent-b", "agent-a"]);
    assert_eq!(outcome.decision.selected_agent_id(), Some("agent-b"));
}

#[test]
fn cold_start_quota_splits_bonus_and_overflow_penalty() {
    let config = ScoringConfig::default().with_cold_start(1, 0.05, 0.05);
    let pool = vec![
        onboard(draft("veteran", 0.7)),
        onboard(draft("rookie-b", 0.7).cold_start(true)),
        onboard(draft("rookie-a", 0.7).cold_start(true)),
    ];

    let mut engine = SelectionEngine::new(config).unwrap();
    let outcome = engine
        .select_at(
            &SelectionRequest::new(RoleRequirement::new("coder")),
            &pool,
            now(),
        )
        .unwrap();

    let bonus: Vec<&str> = outcome
        .ranked
        .iter()
        .filter(|r| matches!(r.adjustment, Some(ColdStartAdjustment::Bonus { .. })))
        .map(|r| r.agent_id.as_str())
        .collect();
    let penalized: Vec<&str> = outcome
        .ranked
        .iter()
        .filter(|r| matches!(r.adjustment, Some(ColdStartAdjustment::OverflowPenalty { .. })))
        .map(|r| r.agent_id.as_str())
        .collect();

    assert_eq!(bonus, vec!["rookie-a"]);
    assert_eq!(penalized, vec!["rookie-b"]);
    assert_eq!(ids(&outcome.ranked), vec!["rookie-a", "veteran", "rookie-b"]);
    assert_eq!(outcome.ranked.last().unwrap().agent_id, "rookie-b");
}

#[test]
fn candidate_missing_required_tool_is_never_ranked() {
    let pool = vec![
        onboard(
            draft("star-without-docker", 0.99)
                .with_capabilities(AgentCapabilities::new().with(Dimension::Tools, ["podman"])),
        ),
        onboard(
            draft("steady-with-docker", 0.4)
                .with_capabilities(AgentCapabilities::new().with(Dimension::Tools, ["docker"])),
        ),
    ];
    let requirement = RoleRequirement::new("ops").require_tools(["docker"]);

    let mut engine = SelectionEngine::new(ScoringConfig::default()).unwrap();
    let outcome = engine
        .select_at(&SelectionRequest::new(requirement), &pool, now())
        .unwrap();

    assert_eq!(ids(&outcome.ranked), vec!["steady-with-docker"]);
    let round = &engine.last_rounds(Some(1)).unwrap()[0];
    assert!(!round.shortlist.contains(&"star-without-docker".to_string()));
}

#[test]
fn requirement_fit_outweighs_base_at_weight_point_six() {
    let x = onboard(
        draft("x-famous", 0.95)
            .with_capabilities(AgentCapabilities::new().with(Dimension::Skills, ["cobol"])),
    );
    let y = onboard(
        draft("y-specialist", 0.5).with_capabilities(
            AgentCapabilities::new()
                .with(Dimension::Skills, ["rust", "wasm"])
                .with(Dimension::Tools, ["docker"]),
        ),
    );
    assert!(x.base_value() > y.base_value());

    let requirement = RoleRequirement::new("coder")
        .with_skills(["rust", "wasm"])
        .with_tools(["docker"]);
    let config = ScoringConfig::default().with_requirement_weight(0.6);
    let mut engine = SelectionEngine::new(config).unwrap();
    let outcome = engine
        .select_at(&SelectionRequest::new(requirement), &[x, y], now())
        .unwrap();

    assert_eq!(outcome.decision.selected_agent_id(), Some("y-specialist"));
    assert_eq!(outcome.decision.action, DecisionAction::System);
    let x_rank = outcome
        .ranked
        .iter()
        .find(|r| r.agent_id == "x-famous")
        .unwrap();
    assert_eq!(x_rank.fit.score, 0.0);
}

#[test]
fn failing_candidates_absent_from_every_round() {
    let certified = |id: &str, score: f64| {
        onboard(
            draft(id, score).with_capabilities(
                AgentCapabilities::new()
                    .with(Dimension::Tools, ["git", "docker"])
                    .with(Dimension::Certifications, ["soc2"]),
            ),
        )
    };
    let mut pool: Vec<AgentProfile> = (0..7)
        .map(|i| certified(&format!("ok-{i}"), 0.3 + 0.05 * i as f64))
        .collect();
    pool.push(onboard(draft("no-cert", 0.95).with_capabilities(
        AgentCapabilities::new().with(Dimension::Tools, ["git", "docker"]),
    )));
    pool.push(onboard(draft("no-docker", 0.9).with_capabilities(
        AgentCapabilities::new()
            .with(Dimension::Tools, ["git"])
            .with(Dimension::Certifications, ["soc2"]),
    )));

    let requirement = RoleRequirement::new("auditor")
        .require_tools(["docker"])
        .require_certifications(["soc2"]);
    let config = ScoringConfig::default().with_top_n(3);
    let mut engine = SelectionEngine::new(config).unwrap();
    let mut request = SelectionRequest::new(requirement);
    for _ in 0..4 {
        engine.select_at(&request, &pool, now()).unwrap();
        request = request.next_batch();
    }

    for round in engine.last_rounds(None).unwrap() {
        for banned in ["no-cert", "no-docker"] {
            assert!(!round.shortlist.iter().any(|id| id == banned));
            assert!(!round.ranked.iter().any(|r| r.agent_id == banned));
        }
    }
}

#[test]
fn rationale_explains_missing_capabilities() {
    let profile = onboard(
        draft("agent-a", 0.6).with_capabilities(
            AgentCapabilities::new()
                .with(Dimension::Skills, ["rust"])
                .with(Dimension::Languages, ["en"]),
        ),
    );
    let requirement = RoleRequirement::new("coder")
        .with_skills(["rust", "sql"])
        .with_languages(["en"]);

    let mut engine = SelectionEngine::new(ScoringConfig::default()).unwrap();
    let outcome = engine
        .select_at(&SelectionRequest::new(requirement), &[profile], now())
        .unwrap();

    let fit = &outcome.ranked[0].fit;
    assert_eq!(fit.rationale, "skills 1/2 (missing: sql); languages 1/1");
    assert!((fit.score - 0.75).abs() < 1e-9);
}
