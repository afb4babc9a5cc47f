//! Navigation targets emitted by the state coordinators

use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// A screen the front-end should navigate to.
///
/// Coordinators only emit these; routing itself belongs to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum NavigationRoute {
    /// The user list
    Home,
    /// Detail view for one cached user
    UserDetail {
        /// Id of the user to show
        user_id: UserId,
    },
}
