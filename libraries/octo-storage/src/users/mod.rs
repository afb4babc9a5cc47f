//! GitHub user cache queries
//!
//! Reads return rows ordered by id ascending. Writes report how many rows
//! they touched so callers can decide whether observers need waking.

use crate::error::Result;
use octo_core::types::{GitHubUser, UserId};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_USERS: &str = "SELECT id, login, node_id, avatar_url, gravatar_id, url, html_url,
        followers_url, following_url, gists_url, starred_url, subscriptions_url,
        organizations_url, repos_url, events_url, received_events_url,
        user_type, user_view_type, site_admin
     FROM github_users";

const UPSERT_USER: &str = "INSERT OR REPLACE INTO github_users (
        id, login, node_id, avatar_url, gravatar_id, url, html_url,
        followers_url, following_url, gists_url, starred_url, subscriptions_url,
        organizations_url, repos_url, events_url, received_events_url,
        user_type, user_view_type, site_admin, cached_at
     ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))";

/// Get every cached user
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<GitHubUser>> {
    let users = sqlx::query_as::<_, GitHubUser>(&format!("{SELECT_USERS} ORDER BY id ASC"))
        .fetch_all(pool)
        .await?;

    Ok(users)
}

/// Get users whose login contains `query`
///
/// Matching is case-insensitive for ASCII. `%`, `_` and `\` in the query
/// match themselves. Users without a login never match.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<GitHubUser>> {
    let pattern = format!("%{}%", escape_like(query));

    let users = sqlx::query_as::<_, GitHubUser>(&format!(
        "{SELECT_USERS} WHERE login LIKE ? ESCAPE '\\' ORDER BY id ASC"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Get a single user by id
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<GitHubUser>> {
    let user = sqlx::query_as::<_, GitHubUser>(&format!("{SELECT_USERS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Highest cached id, `None` when the table is empty
pub async fn max_id(pool: &SqlitePool) -> Result<Option<UserId>> {
    let id = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(id) FROM github_users")
        .fetch_one(pool)
        .await?;

    Ok(id)
}

/// Insert or replace each user by id inside a single transaction
pub async fn upsert_many(pool: &SqlitePool, users: &[GitHubUser]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let affected = upsert_with(&mut tx, users).await?;
    tx.commit().await?;

    Ok(affected)
}

/// Delete every cached user
pub async fn delete_all(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM github_users")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete everything and insert `users` in one transaction
///
/// Returns the number of rows deleted plus the number inserted.
pub async fn replace_all(pool: &SqlitePool, users: &[GitHubUser]) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM github_users")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let inserted = upsert_with(&mut tx, users).await?;

    tx.commit().await?;

    Ok(deleted + inserted)
}

async fn upsert_with(conn: &mut SqliteConnection, users: &[GitHubUser]) -> Result<u64> {
    let mut affected = 0;

    for user in users {
        let result = sqlx::query(UPSERT_USER)
            .bind(user.id)
            .bind(&user.login)
            .bind(&user.node_id)
            .bind(&user.avatar_url)
            .bind(&user.gravatar_id)
            .bind(&user.url)
            .bind(&user.html_url)
            .bind(&user.followers_url)
            .bind(&user.following_url)
            .bind(&user.gists_url)
            .bind(&user.starred_url)
            .bind(&user.subscriptions_url)
            .bind(&user.organizations_url)
            .bind(&user.repos_url)
            .bind(&user.events_url)
            .bind(&user.received_events_url)
            .bind(&user.user_type)
            .bind(&user.user_view_type)
            .bind(user.site_admin)
            .execute(&mut *conn)
            .await?;

        affected += result.rows_affected();
    }

    Ok(affected)
}

/// Escape LIKE wildcards so the query is matched literally
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
