//! Error types for cellularlib-core
//!
//! Provides a unified error type for the accessor types in the core crate.
//! Every check runs when a [`Grid`](crate::Grid), [`IntensityOrder`](crate::IntensityOrder)
//! or [`Mask`](crate::Mask) is created or paired with another buffer, so that
//! no algorithm ever starts from inconsistent inputs.

use thiserror::Error;

/// cellularlib error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {nx}x{ny}")]
    InvalidDimension { nx: usize, ny: usize },

    /// A buffer does not have the expected shape
    #[error("shape mismatch for {name}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        name: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A buffer holds elements the accessor cannot accept
    #[error("type mismatch for {name}: {message}")]
    TypeMismatch { name: &'static str, message: String },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for cellularlib core operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shape mismatch between two flat buffers
    pub(crate) fn length_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Error::ShapeMismatch {
            name,
            expected: vec![expected],
            actual: vec![actual],
        }
    }
}
