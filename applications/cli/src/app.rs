//! Wiring of the cache, the remote source and the coordinators

use crate::config::AppConfig;
use crate::error::Result;
use octo_client::{GitHubClient, RemoteUsersRepository};
use octo_core::{ConnectivityStatus, UserCache, UsersRepository, WatchConnectivity};
use octo_state::{UserDetailCoordinator, UserListCoordinator};
use octo_storage::SqliteUserCache;
use std::sync::Arc;

/// Everything a command needs, built once per invocation
pub struct App {
    cache: Arc<SqliteUserCache>,
    repository: Arc<dyn UsersRepository>,
    connectivity: Arc<WatchConnectivity>,
}

impl App {
    /// Open (and migrate) the cache and build the GitHub client
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        ensure_parent_dir(&config.storage.database_url);

        let pool = octo_storage::create_pool(&config.storage.database_url).await?;
        octo_storage::run_migrations(&pool).await?;
        tracing::debug!(url = %config.storage.database_url, "Cache ready");

        let connectivity = Arc::new(WatchConnectivity::default());
        let client =
            GitHubClient::new(config.client_config())?.with_connectivity(connectivity.clone());
        tracing::debug!(
            users_url = %client.users_url(),
            authenticated = client.is_authenticated(),
            "GitHub client ready"
        );

        Ok(Self {
            cache: Arc::new(SqliteUserCache::new(pool)),
            repository: Arc::new(RemoteUsersRepository::new(client)),
            connectivity,
        })
    }

    /// Report the network as unavailable so remote calls fail fast
    pub fn go_offline(&self) {
        self.connectivity.set_status(ConnectivityStatus::Unavailable);
    }

    pub fn cache(&self) -> Arc<dyn UserCache> {
        self.cache.clone()
    }

    pub fn list_coordinator(&self) -> UserListCoordinator {
        UserListCoordinator::new(self.repository.clone(), self.cache())
    }

    pub fn detail_coordinator(&self) -> UserDetailCoordinator {
        UserDetailCoordinator::new(self.cache())
    }
}

/// SQLite creates the file but not its directory
fn ensure_parent_dir(database_url: &str) {
    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    if path.is_empty() || path.contains(":memory:") {
        return;
    }

    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(dir = %parent.display(), error = %err, "Could not create database directory");
            }
        }
    }
}
