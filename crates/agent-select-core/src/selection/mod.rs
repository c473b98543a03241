//! Selection orchestration.
//!
//! - [`decision`]: `SelectionRequest`, `SelectionDecision`, `DecisionAction`, `SelectionOutcome`
//! - [`engine`]: `SelectionEngine`, `batch_window`

pub mod decision;
pub mod engine;

pub use decision::{DecisionAction, SelectionDecision, SelectionOutcome, SelectionRequest};
pub use engine::{batch_window, SelectionEngine};
