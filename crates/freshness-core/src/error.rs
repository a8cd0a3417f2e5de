//! Error types for freshness computation

use thiserror::Error;

/// Result type alias for freshness computation
pub type Result<T> = std::result::Result<T, Error>;

/// Freshness computation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument the computation cannot work with
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
