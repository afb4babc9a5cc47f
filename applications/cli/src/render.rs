//! Plain-text rendering of coordinator state

use octo_core::GitHubUser;
use octo_state::{UserDetailState, UserListState};
use std::fmt::Write;

/// One line per user: id, login, type and an admin marker
pub fn user_row(user: &GitHubUser) -> String {
    format!(
        "{:>10}  {:<39}  {:<12}{}",
        user.id,
        user.login_or_default(),
        user.user_type.as_deref().unwrap_or("-"),
        if user.is_site_admin() { "  admin" } else { "" }
    )
}

pub fn user_rows(users: &[GitHubUser]) -> String {
    let mut out = String::new();
    for user in users {
        out.push_str(&user_row(user));
        out.push('\n');
    }
    out
}

pub fn user_list(state: &UserListState) -> String {
    user_rows(&state.users)
}

/// Counts and flags shown under a listing
pub fn list_summary(state: &UserListState) -> String {
    let mut out = format!("{} users", state.users.len());
    if state.is_search_active || !state.search_query.is_empty() {
        let _ = write!(out, " matching \"{}\"", state.search_query);
    }
    if state.has_more_pages {
        out.push_str(", more available");
    } else {
        out.push_str(", end of list");
    }
    out
}

/// Summary after loading more pages; `shown_before` is the list length
/// before the first page was requested
pub fn page_summary(state: &UserListState, shown_before: usize) -> String {
    format!(
        "{} new, {}",
        state.users.len().saturating_sub(shown_before),
        list_summary(state)
    )
}

pub fn user_detail(state: &UserDetailState) -> Option<String> {
    let user = state.user.as_ref()?;
    let mut out = String::new();

    let mut field = |name: &str, value: Option<&str>| {
        let _ = writeln!(out, "{:<20} {}", name, value.unwrap_or("-"));
    };

    field("id", Some(&user.id.to_string()));
    field("login", user.login.as_deref());
    field("type", user.user_type.as_deref());
    field("site_admin", Some(if user.is_site_admin() { "yes" } else { "no" }));
    field("node_id", user.node_id.as_deref());
    field("html_url", user.html_url.as_deref());
    field("avatar_url", user.avatar_url.as_deref());
    field("gravatar_id", user.gravatar_id.as_deref());
    field("url", user.url.as_deref());
    field("followers_url", user.followers_url.as_deref());
    field("following_url", user.following_url.as_deref());
    field("gists_url", user.gists_url.as_deref());
    field("starred_url", user.starred_url.as_deref());
    field("subscriptions_url", user.subscriptions_url.as_deref());
    field("organizations_url", user.organizations_url.as_deref());
    field("repos_url", user.repos_url.as_deref());
    field("events_url", user.events_url.as_deref());
    field("received_events_url", user.received_events_url.as_deref());
    field("user_view_type", user.user_view_type.as_deref());

    Some(out)
}
