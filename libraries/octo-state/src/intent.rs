//! Intents the coordinators accept

use octo_core::{GitHubUser, UserId};

/// Everything the user list screen can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListIntent {
    /// Fetch the first page and replace the cache with it
    LoadUsers,
    /// Fetch the page after the last user shown and append it
    LoadNextPage,
    /// Like `LoadUsers`, but always runs and drives the refresh spinner
    RefreshUsers,
    /// Filter the list by login; a blank query shows everything
    SearchUsers(String),
    ToggleSearch,
    ClearSearch,
    NavigateToDetail(GitHubUser),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDetailIntent {
    LoadUser(UserId),
    NavigateBack,
}
