//! Error types for the I/O side of DocDrift
//!
//! The detection core never fails; these cover git access, configuration and
//! input handling around it.

use thiserror::Error;

/// Distinguished failures surfaced by the collaborators around the core
#[derive(Debug, Error)]
pub enum DocDriftError {
    /// The path is not inside a git working tree
    #[error("not a git repository: {0}")]
    NotARepository(String),

    /// The base reference could not be resolved to a commit
    #[error("unknown base reference '{0}'")]
    UnknownBase(String),

    /// Threshold outside the freshness score range
    #[error("threshold {0} is outside the range 0-100")]
    InvalidThreshold(f64),

    /// Matcher name not recognized
    #[error("unknown reference matcher '{0}' (expected 'substring' or 'word')")]
    UnknownMatcher(String),

    /// The diff input could not be read
    #[error("failed to read diff from {0}")]
    DiffInput(String),
}

/// Validate a caller-supplied threshold
pub fn validate_threshold(threshold: f64) -> Result<f64, DocDriftError> {
    if threshold.is_finite() && (0.0..=100.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(DocDriftError::InvalidThreshold(threshold))
    }
}
