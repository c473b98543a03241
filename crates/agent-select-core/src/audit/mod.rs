//! Append-only audit history of selection rounds.
//!
//! - [`round`]: `SelectionRound`, `RoundSummary`, `OverrideRejection`
//! - [`sink`]: the `AuditSink` trait and `InMemoryAuditLog`
//! - [`jsonl`]: `JsonlAuditSink`, `read_rounds`

pub mod jsonl;
pub mod round;
pub mod sink;

pub use jsonl::{read_rounds, JsonlAuditSink};
pub use round::{OverrideRejection, RoundInput, RoundSummary, SelectionRound};
pub use sink::{AuditSink, InMemoryAuditLog};
