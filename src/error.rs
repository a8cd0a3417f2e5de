//! Error types for Content Cache

use thiserror::Error;

/// Result type alias for Content Cache
pub type Result<T> = std::result::Result<T, Error>;

/// Content Cache errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Freshness computation error
    #[error(transparent)]
    Freshness(#[from] freshness_core::Error),

    /// Logging setup error
    #[error("Tracing error: {0}")]
    Tracing(String),
}

impl Error {
    /// Whether the caller passed an argument the computation rejects
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::Freshness(freshness_core::Error::InvalidArgument(_))
        )
    }
}
