//! Error types for the climate library.

use thiserror::Error;

/// Errors that can occur when persisting or loading climate records.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying SQLite error (open, schema, or query failure).
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The connection lock was poisoned by a panicking thread.
    #[error("store connection lock poisoned")]
    Poisoned,
}

/// Result type alias using [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
