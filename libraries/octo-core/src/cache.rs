//! Cache contract for user records
//!
//! The cache is the source of truth for what the list shows when idle.
//! Observable queries are live: they yield the current rows immediately and
//! again after every write that changed rows, whoever made it.

use crate::error::Result;
use crate::types::{GitHubUser, UserId};
use async_trait::async_trait;
use futures_util::Stream;
use std::pin::Pin;

/// A live query over cached users. Each item is a complete, id-ordered snapshot.
pub type UserStream = Pin<Box<dyn Stream<Item = Result<Vec<GitHubUser>>> + Send>>;

/// Persistent, shared store of user records keyed by id.
#[async_trait]
pub trait UserCache: Send + Sync {
    /// All cached users ordered by id ascending
    fn observe_all(&self) -> UserStream;

    /// Users whose login contains `query` (case-insensitive), ordered by id ascending
    fn observe_search(&self, query: &str) -> UserStream;

    /// Point lookup
    async fn get_user_by_id(&self, id: UserId) -> Result<Option<GitHubUser>>;

    /// Insert or replace by id
    async fn insert_users(&self, users: &[GitHubUser]) -> Result<()>;

    /// Delete every cached user
    async fn clear_all(&self) -> Result<()>;

    /// Clear and insert as one write; observers see a single change
    async fn replace_all(&self, users: &[GitHubUser]) -> Result<()>;

    /// Highest cached id, if any
    async fn last_user_id(&self) -> Result<Option<UserId>>;
}
