//! MCDA error taxonomy.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the ranking engine and weight configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McdaError {
    /// The branch list cannot be analyzed (e.g. it is empty).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A weight set was rejected; the previous weights stay in effect.
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
}

impl McdaError {
    /// Returns the matching domain error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            McdaError::InvalidInput(_) => ErrorCode::InvalidInput,
            McdaError::InvalidWeights(_) => ErrorCode::InvalidWeights,
        }
    }
}

impl From<McdaError> for DomainError {
    fn from(err: McdaError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
