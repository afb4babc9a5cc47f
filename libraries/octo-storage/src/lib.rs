//! Octolist Storage
//!
//! `SQLite` cache of GitHub users.
//!
//! The [`users`] module owns the queries; [`SqliteUserCache`] wraps them in
//! the [`octo_core::UserCache`] contract and turns the read queries into
//! live streams that re-emit after every write that changed rows.
//!
//! # Example
//!
//! ```rust,no_run
//! use octo_core::UserCache;
//! use octo_storage::{create_pool, run_migrations, SqliteUserCache};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://octo.db").await?;
//! run_migrations(&pool).await?;
//!
//! let cache = SqliteUserCache::new(pool);
//! let newest = cache.last_user_id().await?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;

pub mod users;

pub use cache::SqliteUserCache;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before handing the pool to a cache.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://octo.db>`)
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let mut pool_options = SqlitePoolOptions::new().max_connections(5);

    // Every connection to an in-memory database sees its own empty database
    if database_url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;

    tracing::debug!(size = pool.size(), "SQLite pool ready");

    Ok(pool)
}
