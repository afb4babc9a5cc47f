//! Observable state records

use octo_core::GitHubUser;
use serde::{Deserialize, Serialize};

/// Everything the user list screen renders.
///
/// The three spinner flags are independent of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListState {
    /// Ascending by id, unless a search is filtering them
    pub users: Vec<GitHubUser>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub is_paginating: bool,
    pub search_query: String,
    pub is_search_active: bool,
    /// Last failure, kept until something supersedes it
    pub error_message: Option<String>,
    /// Cleared once the remote returns an empty page
    pub has_more_pages: bool,
}

impl UserListState {
    /// True while no fetch is in flight
    pub fn is_idle(&self) -> bool {
        !(self.is_loading || self.is_refreshing || self.is_paginating)
    }
}

impl Default for UserListState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            is_loading: false,
            is_refreshing: false,
            is_paginating: false,
            search_query: String::new(),
            is_search_active: false,
            error_message: None,
            has_more_pages: true,
        }
    }
}

/// State of the single-user detail screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetailState {
    pub user: Option<GitHubUser>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}
