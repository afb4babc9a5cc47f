//! Octolist GitHub Client
//!
//! HTTP client for the GitHub `/users` listing.
//!
//! # Features
//!
//! - **Paging**: `GET /users?since=<id>`, one page per call
//! - **Error mapping**: transport failures and non-success statuses become
//!   `octo_core::RemoteError` with a user-facing message
//! - **Offline fail-fast**: an optional connectivity observer short-circuits
//!   requests while the network is down
//! - **Redacted logging**: tokens never reach the logs
//!
//! # Example
//!
//! ```ignore
//! use octo_client::{ClientConfig, GitHubClient, RemoteUsersRepository};
//! use octo_core::UsersRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::new(ClientConfig::default())?;
//!     let repository = RemoteUsersRepository::new(client);
//!
//!     let page = repository.get_github_users(0).await?;
//!     println!("Fetched {} users", page.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod repository;
mod types;

pub mod redaction;

pub use client::GitHubClient;
pub use error::{ClientError, Result};
pub use repository::RemoteUsersRepository;
pub use types::{ClientConfig, ServerErrorEnvelope, DEFAULT_BASE_URL, GITHUB_ACCEPT};
