use rerank_tester_rerank::ProviderError;
use thiserror::Error;

/// Terminal outcomes of a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("missing required column: {0}")]
    Schema(String),

    #[error("no row produced a valid result ({failed} of {total} rows failed)")]
    EmptyResult { failed: usize, total: usize },
}

/// One row's rerank call could not be completed.
#[derive(Debug, Error)]
#[error("rerank request failed: {0}")]
pub struct RerankRequestError(#[from] pub ProviderError);

/// A failed row, reported alongside the results instead of aborting the run.
#[derive(Debug)]
pub struct RowFailure {
    /// Zero-based position of the row in the input table.
    pub row: usize,
    pub error: RerankRequestError,
}

impl RowFailure {
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}
