use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),

    #[error("non-finite coordinate at point {index}: ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },

    #[error("serialization error: {0}")]
    Serialization(String),
}
