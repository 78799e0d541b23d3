//! Unified application error types
//!
//! Provides a single error type for the engine. Nothing here is fatal by
//! policy: network and rate-limit failures are recovered with fallback data
//! and storage failures degrade to in-memory defaults before a caller sees
//! them.

use thiserror::Error;

use crate::storage::StorageError;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure talking to the catalog API
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The catalog API signalled that the rate limit was exceeded
    #[error("catalog API rate limit exceeded")]
    RateLimited,

    /// Persistent store failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for the failure classes the data source recovers with mock data
    pub fn is_recoverable_fetch(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_rate_limit_is_recoverable() {
        assert!(AppError::RateLimited.is_recoverable_fetch());
        assert!(!AppError::internal("boom").is_recoverable_fetch());
    }
}
