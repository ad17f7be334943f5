//! Error types for the clustering core.

use thiserror::Error;

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, KMeansError>;

/// Errors that can occur while clustering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansError {
    /// No data points were supplied.
    #[error("empty input data")]
    EmptyData,

    /// The center set is empty.
    #[error("at least one center is required")]
    NoCenters,

    /// The number of initial centers does not match the declared cluster count.
    #[error("center count mismatch: expected {expected}, got {got}")]
    CenterCountMismatch { expected: usize, got: usize },

    /// The assignment does not have one entry per data point.
    #[error("assignment length mismatch: expected {expected}, got {got}")]
    AssignmentLengthMismatch { expected: usize, got: usize },

    /// An assignment entry refers to a center that does not exist.
    #[error("center index out of range: {index} (centers: {num_centers})")]
    CenterIndexOutOfRange { index: usize, num_centers: usize },

    /// Array shape does not describe 2-D points.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The iteration cap was reached before the centers stabilized.
    #[error("did not converge within {iterations} iterations")]
    DidNotConverge { iterations: usize },

    /// An observer asked the run to stop.
    #[error("clustering cancelled before iteration {iteration}")]
    Cancelled { iteration: usize },
}
