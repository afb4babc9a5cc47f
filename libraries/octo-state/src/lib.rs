//! Octolist State
//!
//! Coordinators that own the screen state of the user list and the user
//! detail view. Front-ends send intents and render whatever the state
//! channel publishes.
//!
//! # Example
//!
//! ```rust,no_run
//! use octo_state::{UserListCoordinator, UserListIntent};
//! # use std::sync::Arc;
//! # async fn example(
//! #     repository: Arc<dyn octo_core::UsersRepository>,
//! #     cache: Arc<dyn octo_core::UserCache>,
//! # ) {
//! let coordinator = UserListCoordinator::new(repository, cache);
//!
//! coordinator.send_intent(UserListIntent::LoadNextPage);
//! coordinator.wait_until_idle().await;
//!
//! let state = coordinator.state();
//! println!("{} users, more: {}", state.users.len(), state.has_more_pages);
//! # }
//! ```

#![forbid(unsafe_code)]

mod detail;
mod intent;
mod list;
mod pending;
mod state;

pub use detail::{UserDetailCoordinator, USER_NOT_FOUND};
pub use intent::{UserDetailIntent, UserListIntent};
pub use list::UserListCoordinator;
pub use state::{UserDetailState, UserListState};
