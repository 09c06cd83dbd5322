//! Error type shared by both analyzers
//!
//! Every variant is an input-validation failure. The analyzers return them
//! directly, with no partial result, and never log or swallow them.

use thiserror::Error;

/// Failure of an analysis call
///
/// # Example
///
/// ```rust
/// use chemlab_rs::analysis::{AnalysisError, conductometric};
///
/// let err = conductometric::standardize_naoh(25.0, 0.0, 0.1).unwrap_err();
/// assert!(matches!(err, AnalysisError::DivisionByZero(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A row is unusable: non-positive total volume, negative volume or a
    /// non-finite reading
    #[error("invalid observation at row {row}: {reason}")]
    InvalidObservation { row: usize, reason: String },

    /// Too few rows to analyze
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Two consecutive sorted titration points share a volume
    #[error("degenerate interval {index}: two consecutive points share volume {volume_ml} ml")]
    DegenerateInterval { index: usize, volume_ml: f64 },

    /// Endpoints are not ordered, are negative, or the sample volume is not positive
    #[error("invalid endpoints: {0}")]
    InvalidEndpoints(String),

    /// Standardization volume or normality is negative or not finite
    #[error("invalid standardization: {0}")]
    InvalidStandardization(String),

    /// Zero denominator
    #[error("division by zero: {0}")]
    DivisionByZero(String),
}

impl AnalysisError {
    pub(crate) fn invalid_observation(row: usize, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidObservation {
            row,
            reason: reason.into(),
        }
    }
}
