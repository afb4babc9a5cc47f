/// Storage-specific errors
use octo_core::{OctoError, RemoteError};
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// `SQLITE_FULL` primary result code
const SQLITE_FULL: &str = "13";

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Whether SQLite refused the write because the disk is full
    pub fn is_disk_full(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(SQLITE_FULL)
            }
            _ => false,
        }
    }
}

impl From<StorageError> for OctoError {
    fn from(err: StorageError) -> Self {
        if err.is_disk_full() {
            return OctoError::Remote(RemoteError::DiskFull);
        }
        OctoError::storage(err.to_string())
    }
}
