//! See [`Error`].

use thiserror::Error;

/// Error types for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Inputs with the wrong shape: mismatched lengths, zero columns, ragged rows.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A metric that is undefined for the given input, e.g. accuracy over zero samples.
    #[error("numerically degenerate input: {0}")]
    NumericDegenerate(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Type alias for [`Result<T, Error>`].
pub type Result<T> = std::result::Result<T, Error>;
