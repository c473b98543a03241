//! Scoring pipeline primitives.
//!
//! # Module layout
//!
//! - [`fault`]: `FaultSeverity`, `FaultRecord`, `FaultLedger`, `CoolingRules`
//! - [`base`]: `StaticScore`, `BaseWeights`, `BaseScore`, `recompute_base`
//! - [`constraint`]: `passes_hard_constraints`, `check_hard_constraints`, `filter_eligible`
//! - [`fit`]: `score_fit`, `FitResult`, `DimensionFit`
//! - [`cold_start`]: `apply_cold_start`, `ColdStartAdjustment`
//! - [`ranker`]: `rank_shortlist`, `order_by_base`, `compare_rankings`, `CandidateRanking`

pub mod base;
pub mod cold_start;
pub mod constraint;
pub mod fault;
pub mod fit;
pub mod ranker;
