//! GitHub user record

use serde::{Deserialize, Serialize};

/// Upstream-assigned user id. Ids grow monotonically across listing pages.
pub type UserId = i64;

/// A GitHub account as returned by the `/users` listing.
///
/// Records are immutable values: a newer copy of the same id replaces the
/// cached one wholesale. Every field except `id` may be missing or null
/// upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct GitHubUser {
    pub id: UserId,
    pub login: Option<String>,
    pub node_id: Option<String>,
    pub avatar_url: Option<String>,
    pub gravatar_id: Option<String>,
    /// API url of the account
    pub url: Option<String>,
    /// Public profile page
    pub html_url: Option<String>,
    pub followers_url: Option<String>,
    pub following_url: Option<String>,
    pub gists_url: Option<String>,
    pub starred_url: Option<String>,
    pub subscriptions_url: Option<String>,
    pub organizations_url: Option<String>,
    pub repos_url: Option<String>,
    pub events_url: Option<String>,
    pub received_events_url: Option<String>,
    /// "User" or "Organization"
    #[serde(rename = "type")]
    pub user_type: Option<String>,
    pub user_view_type: Option<String>,
    pub site_admin: Option<bool>,
}

impl GitHubUser {
    /// Create a record with only an id and login set
    pub fn new(id: UserId, login: impl Into<String>) -> Self {
        Self {
            id,
            login: Some(login.into()),
            node_id: None,
            avatar_url: None,
            gravatar_id: None,
            url: None,
            html_url: None,
            followers_url: None,
            following_url: None,
            gists_url: None,
            starred_url: None,
            subscriptions_url: None,
            organizations_url: None,
            repos_url: None,
            events_url: None,
            received_events_url: None,
            user_type: None,
            user_view_type: None,
            site_admin: None,
        }
    }

    /// Login, or an empty string when upstream omitted it
    pub fn login_or_default(&self) -> &str {
        self.login.as_deref().unwrap_or_default()
    }

    pub fn is_organization(&self) -> bool {
        self.user_type.as_deref() == Some("Organization")
    }

    pub fn is_site_admin(&self) -> bool {
        self.site_admin.unwrap_or(false)
    }
}
