//! Errors raised by document store backends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to encode or decode document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Document store lock poisoned")]
    Poisoned,

    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[cfg(feature = "postgres")]
    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
