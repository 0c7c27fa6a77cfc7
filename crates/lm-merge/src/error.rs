//! Error types for the merge engine.

use lm_order::{OrderError, SolverError};

/// Errors that can occur while merging a candidate set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    /// The candidate set cannot be merged as given: too few lines, a line
    /// without a usable baseline, duplicates, mixed parts, or unknown ids.
    #[error("invalid candidate set: {reason}")]
    InvalidCandidateSet { reason: String },

    /// The lines could not be put in a single linear order: the matching
    /// closed some of them into a cycle away from the start and end.
    #[error("cannot determine a linear order: reached {visited} of {expected} lines")]
    DegenerateMatching { visited: usize, expected: usize },

    /// The assignment solver was handed a malformed matrix.
    #[error("solver failure: {0}")]
    SolverFailure(#[from] SolverError),

    /// A merge configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MergeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidCandidateSet {
            reason: reason.into(),
        }
    }
}

impl From<OrderError> for MergeError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::TooFewLines(n) => {
                Self::invalid(format!("at least 2 lines are required, got {n}"))
            }
            OrderError::UnusableBaseline { index } => {
                Self::invalid(format!("line at position {index} has no usable baseline"))
            }
            OrderError::DegenerateMatching { visited, expected } => {
                Self::DegenerateMatching { visited, expected }
            }
            OrderError::Solver(e) => Self::SolverFailure(e),
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
