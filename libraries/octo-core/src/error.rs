//! Core error types for Octolist
use crate::remote::RemoteError;
use thiserror::Error;

/// Result type alias using `OctoError`
pub type Result<T> = std::result::Result<T, OctoError>;

/// Core error type for Octolist
#[derive(Error, Debug)]
pub enum OctoError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote source failures, already phrased for the user
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl OctoError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
