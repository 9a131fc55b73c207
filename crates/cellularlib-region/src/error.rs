//! Error types for cellularlib-region

use thiserror::Error;

/// Errors that can occur during cluster extraction and analysis
#[derive(Debug, Error)]
pub enum RegionError {
    /// Shape or element check failed at the accessor boundary
    #[error("core error: {0}")]
    Core(#[from] cellularlib_core::Error),

    /// Requested component index is past the end of the set
    #[error("component index {index} out of range for {len} components")]
    IndexOutOfRange { index: isize, len: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Threshold statistics need at least one cluster
    #[error("no cluster found")]
    NoClusterFound,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

/// Reject NaN thresholds before any state is built
pub(crate) fn check_threshold(name: &str, value: f64) -> RegionResult<()> {
    if value.is_nan() {
        return Err(RegionError::InvalidParameters(format!("{} is NaN", name)));
    }
    Ok(())
}

/// Thresholds must be free of NaN and non-decreasing
pub(crate) fn check_ascending(thresholds: &[f64]) -> RegionResult<()> {
    if thresholds.iter().any(|t| t.is_nan()) {
        return Err(RegionError::InvalidParameters(
            "thresholds contain NaN".to_string(),
        ));
    }
    if let Some(w) = thresholds.windows(2).find(|w| w[0] > w[1]) {
        return Err(RegionError::InvalidParameters(format!(
            "thresholds must be ascending: {} before {}",
            w[0], w[1]
        )));
    }
    Ok(())
}
