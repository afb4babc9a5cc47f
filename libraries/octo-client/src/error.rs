//! Error types for constructing the GitHub client.
//!
//! Failures of the listing call itself are `octo_core::RemoteError`.

use thiserror::Error;

/// Errors that can occur while building a [`crate::GitHubClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid base URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Result type for client construction.
pub type Result<T> = std::result::Result<T, ClientError>;
