//! Error types for the ordering engine.

/// Errors raised while validating or solving an assignment matrix.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    /// The matrix has a row whose length differs from the row count.
    #[error("matrix is not square: row {row} has {len} columns, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A cost is NaN or infinite.
    #[error("non-finite cost {value} at ({row}, {col})")]
    NonFinite { row: usize, col: usize, value: f64 },

    /// Sentinel costs cannot express "forbidden" relative to "boundary".
    #[error("invalid sentinel costs: boundary {boundary}, forbidden {forbidden}")]
    InvalidSentinelCosts { boundary: f64, forbidden: f64 },

    /// The solver returned something that is not a permutation.
    #[error("solver returned an invalid assignment: {0}")]
    InvalidAssignment(String),
}

/// Errors that can occur while inferring a reading order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    /// Fewer lines than an ordering needs.
    #[error("at least 2 lines are required, got {0}")]
    TooFewLines(usize),

    /// A line has no usable baseline.
    #[error("line at position {index} has no usable baseline")]
    UnusableBaseline {
        /// Position of the line in the caller-supplied list.
        index: usize,
    },

    /// The matching splits the lines into a chain plus disjoint cycles, so
    /// no single linear order covers every line.
    #[error("matching does not form a single chain: reached {visited} of {expected} lines")]
    DegenerateMatching { visited: usize, expected: usize },

    /// The assignment solver rejected its input.
    #[error("solver error: {0}")]
    Solver(#[from] SolverError),
}

/// Convenience alias for ordering results.
pub type OrderResult<T> = Result<T, OrderError>;
