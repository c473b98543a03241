//! Error taxonomy for the selection engine.

/// Errors produced by scoring, selection and audit operations.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid scoring config: {0}")]
    InvalidConfig(String),

    #[error("invalid score input: {0}")]
    InvalidScore(String),

    #[error("override {agent_id} is not in the ranked output of round {round_sequence}")]
    InvalidOverride {
        agent_id: String,
        round_sequence: u64,
    },

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for selection operations.
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
