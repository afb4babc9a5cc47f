use crate::error::StorageError;
use crate::users;
use async_trait::async_trait;
use octo_core::{
    error::{OctoError, Result},
    types::{GitHubUser, UserId},
    UserCache, UserStream,
};
use sqlx::SqlitePool;
use std::future::Future;
use tokio::sync::watch;

/// [`UserCache`] over a `SQLite` pool
///
/// Every write that changes at least one row bumps a revision counter;
/// open streams re-run their query when they see a new revision. Writes
/// made through another handle to the same database file are not seen.
pub struct SqliteUserCache {
    pool: SqlitePool,
    revision: watch::Sender<u64>,
}

impl SqliteUserCache {
    pub fn new(pool: SqlitePool) -> Self {
        let (revision, _) = watch::channel(0);
        Self { pool, revision }
    }

    fn notify_if_changed(&self, affected: u64) {
        if affected > 0 {
            self.revision.send_modify(|rev| *rev += 1);
        }
    }

    /// Run `query` now and again after every revision bump
    fn live<F, Fut>(&self, query: F) -> UserStream
    where
        F: Fn(SqlitePool) -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<Vec<GitHubUser>, StorageError>> + Send + 'static,
    {
        let rx = self.revision.subscribe();
        let pool = self.pool.clone();

        let stream = futures_util::stream::unfold(
            (rx, pool, query, true),
            |(mut rx, pool, query, first)| async move {
                if !first && rx.changed().await.is_err() {
                    // Cache dropped
                    return None;
                }
                // Mark this revision as seen before reading, so a write that
                // lands during the query still triggers another emission
                let _seen = *rx.borrow_and_update();

                let snapshot = query(pool.clone()).await.map_err(OctoError::from);
                Some((snapshot, (rx, pool, query, false)))
            },
        );

        Box::pin(stream)
    }
}

#[async_trait]
impl UserCache for SqliteUserCache {
    fn observe_all(&self) -> UserStream {
        self.live(|pool| async move { users::get_all(&pool).await })
    }

    fn observe_search(&self, query: &str) -> UserStream {
        let query = query.to_string();
        self.live(move |pool| {
            let query = query.clone();
            async move { users::search(&pool, &query).await }
        })
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<Option<GitHubUser>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn insert_users(&self, batch: &[GitHubUser]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let affected = users::upsert_many(&self.pool, batch).await?;
        tracing::debug!(count = batch.len(), affected, "Cached users");
        self.notify_if_changed(affected);
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        let affected = users::delete_all(&self.pool).await?;
        tracing::debug!(affected, "Cleared user cache");
        self.notify_if_changed(affected);
        Ok(())
    }

    async fn replace_all(&self, batch: &[GitHubUser]) -> Result<()> {
        let affected = users::replace_all(&self.pool, batch).await?;
        tracing::debug!(count = batch.len(), affected, "Replaced user cache");
        self.notify_if_changed(affected);
        Ok(())
    }

    async fn last_user_id(&self) -> Result<Option<UserId>> {
        Ok(users::max_id(&self.pool).await?)
    }
}
