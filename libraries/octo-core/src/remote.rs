//! Remote source and repository seams
//!
//! The state layer only ever branches on success versus failure; the
//! failure's `Display` text is what ends up in front of the user.

use crate::types::{GitHubUser, UserId};
use async_trait::async_trait;
use thiserror::Error;

const UNAUTHORIZED_FALLBACK: &str = "Your session has expired. Please log in again to continue.";

/// Result type for remote listing calls
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Failures a remote listing call can report.
///
/// The `detail` fields carry the server's own wording for logging; the
/// user-facing text is fixed per category except where noted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The request or socket timed out
    #[error("Request timed out. Please check your internet connection and try again.")]
    RequestTimeout,

    /// The device reports no network
    #[error("No internet connection. Please check your network settings and try again.")]
    NoInternet,

    /// The host could not be resolved or connected to
    #[error("Unable to connect to the server. Please check your internet connection or try again later.")]
    UnknownHost,

    /// 5xx response
    #[error("Server error occurred. Please try again later or contact support if the problem persists.")]
    Server { detail: Option<String> },

    /// 401 response; the server's message is shown when it sent one
    #[error("{}", .0.as_deref().unwrap_or(UNAUTHORIZED_FALLBACK))]
    Unauthorized(Option<String>),

    /// 429 response
    #[error("Too many requests. Please wait a moment and try again.")]
    TooManyRequests { detail: Option<String> },

    /// A success body that could not be decoded
    #[error("Data processing error. Please try again or contact support if the problem continues.")]
    Serialization { detail: Option<String> },

    /// Local storage exhausted
    #[error("Device storage is full. Please free up some space and try again.")]
    DiskFull,

    /// Anything else
    #[error("An unexpected error occurred. Please try again or contact support if the problem persists.")]
    Unknown { detail: Option<String> },

    /// Any other non-success status; shows the server's formatted message
    #[error("{message}")]
    Status { status: u16, message: String },
}

impl RemoteError {
    /// Server-provided or transport detail, for logs only
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Server { detail }
            | Self::TooManyRequests { detail }
            | Self::Serialization { detail }
            | Self::Unknown { detail } => detail.as_deref(),
            Self::Unauthorized(detail) => detail.as_deref(),
            Self::Status { message, .. } => Some(message),
            Self::RequestTimeout | Self::NoInternet | Self::UnknownHost | Self::DiskFull => None,
        }
    }
}

/// Issues the paged `/users` listing request.
#[async_trait]
pub trait RemoteDataSource: Send + Sync {
    /// Fetch the page of users whose ids are strictly greater than `since`
    async fn get_github_users(&self, since: UserId) -> RemoteResult<Vec<GitHubUser>>;
}

/// The seam the list coordinator depends on for network access.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Fetch the page of users whose ids are strictly greater than `since`.
    ///
    /// An empty page means there is nothing more to load.
    async fn get_github_users(&self, since: UserId) -> RemoteResult<Vec<GitHubUser>>;
}
