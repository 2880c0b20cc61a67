use thiserror::Error;

use crate::types::Slot;

/// Errors raised by a `QueryClient` implementation.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Connection, HTTP, or timeout failure talking to the node.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered with an error object that has no special meaning
    /// to the analysis layer.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The block for `slot` was skipped by its leader or has been pruned
    /// from the node's long-term storage. Samplers treat this as a gap.
    #[error("Block unavailable at slot {slot} (code {code}): {message}")]
    BlockUnavailable {
        slot: Slot,
        code: i64,
        message: String,
    },

    /// The node's response could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl QueryError {
    /// Whether this error only signals a missing block rather than a
    /// failing transport.
    pub fn is_block_unavailable(&self) -> bool {
        matches!(self, QueryError::BlockUnavailable { .. })
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self {
        QueryError::Decode(e.to_string())
    }
}

/// Errors raised by the analytical routines.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Not enough usable data points could be gathered for `what`.
    #[error("Insufficient data: collected {collected} of {required} {what}")]
    InsufficientData {
        what: &'static str,
        collected: usize,
        required: usize,
    },

    /// A routine was called with arguments outside its domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A fatal query failure, propagated unmodified.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl AnalysisError {
    /// Whether this failure is a recoverable shortage of data, as opposed to
    /// a transport failure or caller error.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, AnalysisError::InsufficientData { .. })
    }
}
