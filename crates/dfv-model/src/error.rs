use thiserror::Error;

/// Raised by `raise_if_invalid` when at least one expectation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed for {failed} expectations")]
pub struct ValidationError {
    /// Number of failed expectations.
    pub failed: usize,
}

/// Errors that abort an expectation call before any ledger update.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The rule requires a column type the dataset does not have.
    #[error("column '{column}' is not of {expected} type (found {actual})")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },
    /// Failing rows could not be appended to the failure ledger.
    #[error("failed to merge failing rows for {expectation}: {message}")]
    LedgerMerge {
        expectation: String,
        message: String,
    },
}
