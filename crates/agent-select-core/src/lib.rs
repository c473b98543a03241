//! Agent Selection Core
//!
//! Ranks candidate agents for a work role and records every decision:
//! hard-constraint filtering, a cached base score plus a per-request fit
//! score, cold-start exposure control, deterministic tie-breaking, batched
//! re-offers, user overrides, and an append-only audit log.

pub mod audit;
pub mod capability;
pub mod config;
pub mod error;
pub mod metrics;
pub mod obs;
pub mod profile;
pub mod requirement;
pub mod scoring;
pub mod selection;
pub mod telemetry;

pub use audit::{
    read_rounds, AuditSink, InMemoryAuditLog, JsonlAuditSink, OverrideRejection, RoundSummary,
    SelectionRound,
};
pub use capability::{AgentCapabilities, Dimension};
pub use config::ScoringConfig;
pub use error::{SelectionError, SelectionResult};
pub use profile::{refresh_base, AgentProfile, ProfileDraft};
pub use requirement::RoleRequirement;
pub use scoring::base::{recompute_base, BaseScore, BaseWeights, StaticScore};
pub use scoring::cold_start::ColdStartAdjustment;
pub use scoring::constraint::{check_hard_constraints, passes_hard_constraints, ConstraintViolation};
pub use scoring::fault::{CoolingRules, FaultLedger, FaultRecord, FaultSeverity};
pub use scoring::fit::{score_fit, DimensionFit, FitResult};
pub use scoring::ranker::{CandidateRanking, TieBreakSignals};
pub use selection::{
    DecisionAction, SelectionDecision, SelectionEngine, SelectionOutcome, SelectionRequest,
};

pub use metrics::METRICS;
pub use telemetry::init_tracing;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
