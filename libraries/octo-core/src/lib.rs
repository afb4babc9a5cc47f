//! Octolist Core
//!
//! Platform-agnostic core types, traits, and error handling for Octolist.
//!
//! This crate provides the foundational building blocks shared by the storage,
//! client, and state crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `GitHubUser`, `NavigationRoute`
//! - **Collaborator Traits**: `UserCache`, `RemoteDataSource`, `UsersRepository`,
//!   `ConnectivityObserver`
//! - **Error Handling**: Unified `OctoError` and the user-facing `RemoteError` taxonomy
//!
//! # Example
//!
//! ```rust
//! use octo_core::types::{GitHubUser, NavigationRoute};
//!
//! let user = GitHubUser::new(1, "mojombo");
//! let route = NavigationRoute::UserDetail { user_id: user.id };
//! assert_eq!(route, NavigationRoute::UserDetail { user_id: 1 });
//! ```

#![forbid(unsafe_code)]

pub mod cache;
pub mod connectivity;
pub mod error;
pub mod remote;
pub mod types;

// Re-export commonly used types
pub use cache::{UserCache, UserStream};
pub use connectivity::{ConnectivityObserver, ConnectivityStatus, WatchConnectivity};
pub use error::{OctoError, Result};
pub use remote::{RemoteDataSource, RemoteError, RemoteResult, UsersRepository};
pub use types::{GitHubUser, NavigationRoute, UserId};
