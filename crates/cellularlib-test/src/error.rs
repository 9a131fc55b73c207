//! Harness errors

use thiserror::Error;

/// Failure of the harness itself, as opposed to a failed comparison
#[derive(Debug, Error)]
pub enum TestError {
    /// An output file could not be written
    #[error("cannot write test output {path}: {message}")]
    DataWrite { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type TestResult<T> = Result<T, TestError>;
