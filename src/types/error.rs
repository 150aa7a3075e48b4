//! Error types for the ART-2A clustering library.

use thiserror::Error;

/// All errors that can occur in the ART-2A clustering library.
#[derive(Error, Debug)]
pub enum Art2aError {
    /// Vigilance parameter outside the open interval (0, 1).
    #[error("Vigilance parameter must lie strictly between 0 and 1: {0}")]
    InvalidVigilance(f64),

    /// Learning rate outside the half-open interval (0, 1].
    #[error("Learning rate must lie in (0, 1]: {0}")]
    InvalidLearningRate(f64),

    /// Epoch budget of zero.
    #[error("Maximum number of epochs must be at least 1: {0}")]
    InvalidEpochBudget(usize),

    /// Data matrix has no rows or rows of length zero.
    #[error("Data matrix is empty")]
    EmptyMatrix,

    /// A row does not match the dimensionality of the first row.
    #[error("Row {row} has {got} components, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A component is negative.
    #[error("Negative component at row {row}, column {column}")]
    NegativeComponent { row: usize, column: usize },

    /// A component is NaN or infinite.
    #[error("Non-finite component at row {row}, column {column}")]
    NonFiniteComponent { row: usize, column: usize },

    /// Every row of the data matrix is a null vector.
    #[error("Data matrix contains only null vectors, nothing to cluster")]
    NoClusterableVectors,

    /// The epoch budget was exhausted before the cluster assignment stabilized.
    #[error("Clustering did not converge within {epochs} epochs")]
    ConvergenceFailure { epochs: usize },

    /// Cluster number out of range.
    #[error("Cluster number {cluster} out of range, {count} clusters detected")]
    InvalidClusterNumber { cluster: usize, count: usize },

    /// A required export sink was not supplied.
    #[error("Missing {0} sink for export")]
    MissingSink(&'static str),

    /// Export was requested from a result built without logs.
    #[error("Clustering result was created without export logs")]
    ExportNotRequested,

    /// Invalid configuration file or value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed line in a matrix file.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Art2aError {
    /// Whether this error rejects a configuration or input before any clustering runs.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidVigilance(_)
                | Self::InvalidLearningRate(_)
                | Self::InvalidEpochBudget(_)
                | Self::EmptyMatrix
                | Self::DimensionMismatch { .. }
                | Self::NegativeComponent { .. }
                | Self::NonFiniteComponent { .. }
                | Self::NoClusterableVectors
                | Self::ExportNotRequested
                | Self::Config(_)
        )
    }
}

/// Convenience result type for ART-2A operations.
pub type Art2aResult<T> = Result<T, Art2aError>;
