//! Test helpers and fixtures for storage integration tests
//!
//! Databases are REAL SQLite files in a temp dir (NOT in-memory) so
//! migrations, constraints and WAL behave as in production.

#![allow(dead_code)]

use octo_core::types::GitHubUser;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = octo_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        octo_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: a fully populated user
pub fn user(id: i64, login: &str) -> GitHubUser {
    let mut user = GitHubUser::new(id, login);
    user.node_id = Some(format!("MDQ6VXNlcj{id}"));
    user.avatar_url = Some(format!("https://avatars.githubusercontent.com/u/{id}?v=4"));
    user.html_url = Some(format!("https://github.com/{login}"));
    user.url = Some(format!("https://api.github.com/users/{login}"));
    user.user_type = Some("User".to_string());
    user.site_admin = Some(false);
    user
}

/// Test fixture: users with ids `ids`, logins `user<id>`
pub fn users(ids: impl IntoIterator<Item = i64>) -> Vec<GitHubUser> {
    ids.into_iter()
        .map(|id| user(id, &format!("user{id}")))
        .collect()
}
