//! Repository over a remote data source.

use async_trait::async_trait;
use octo_core::{GitHubUser, RemoteDataSource, RemoteResult, UserId, UsersRepository};
use tracing::debug;

/// [`UsersRepository`] that forwards every call to a [`RemoteDataSource`].
pub struct RemoteUsersRepository<S> {
    source: S,
}

impl<S: RemoteDataSource> RemoteUsersRepository<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: RemoteDataSource> UsersRepository for RemoteUsersRepository<S> {
    async fn get_github_users(&self, since: UserId) -> RemoteResult<Vec<GitHubUser>> {
        let result = self.source.get_github_users(since).await;
        if let Err(err) = &result {
            debug!(since, error = %err, detail = ?err.detail(), "Users page failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use octo_core::RemoteError;

    mock! {
        pub Source {}

        #[async_trait]
        impl RemoteDataSource for Source {
            async fn get_github_users(&self, since: UserId) -> RemoteResult<Vec<GitHubUser>>;
        }
    }

    #[tokio::test]
    async fn forwards_cursor_and_page() {
        let mut source = MockSource::new();
        source
            .expect_get_github_users()
            .with(eq(46))
            .times(1)
            .returning(|_| Ok(vec![GitHubUser::new(47, "bmizerany")]));

        let repository = RemoteUsersRepository::new(source);
        let page = repository.get_github_users(46).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 47);
    }

    #[tokio::test]
    async fn forwards_errors_unchanged() {
        let mut source = MockSource::new();
        source
            .expect_get_github_users()
            .times(1)
            .returning(|_| Err(RemoteError::TooManyRequests { detail: None }));

        let repository = RemoteUsersRepository::new(source);
        let err = repository.get_github_users(0).await.unwrap_err();

        assert_eq!(err, RemoteError::TooManyRequests { detail: None });
    }

    #[tokio::test]
    async fn empty_page_passes_through() {
        let mut source = MockSource::new();
        source
            .expect_get_github_users()
            .returning(|_| Ok(Vec::new()));

        let repository = RemoteUsersRepository::new(source);
        assert!(repository.get_github_users(1_000_000).await.unwrap().is_empty());
    }
}
