//! Buffer engine errors

use thiserror::Error;

use crate::chain::ChainError;

/// Non-fatal signal from a buffer operation.
///
/// Every variant leaves the buffer exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Buffer is full. Cannot add {requested} characters ({remaining} remaining).")]
    CapacityExceeded { requested: usize, remaining: usize },

    #[error("No text provided.")]
    EmptyText,

    #[error("Nothing to delete.")]
    NothingToDelete,

    #[error("No text to print.")]
    NothingToPrint,

    #[error("Capacity must be a positive integer.")]
    ZeroCapacity,

    #[error("Buffer invariant violated: {0}")]
    Corrupted(String),
}

impl BufferError {
    /// Benign no-ops that are reported for information only
    pub fn is_empty_operation(&self) -> bool {
        matches!(
            self,
            BufferError::EmptyText | BufferError::NothingToDelete | BufferError::NothingToPrint
        )
    }
}

impl From<ChainError> for BufferError {
    fn from(err: ChainError) -> Self {
        BufferError::Corrupted(err.to_string())
    }
}
