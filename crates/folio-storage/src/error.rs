//! Storage error types.
//!
//! Every error variant carries enough context to diagnose the problem
//! without a debugger.

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to open or connect to the storage backend.
    #[error("failed to open storage at '{location}': {reason}")]
    Open { location: String, reason: String },

    /// Failed to create the backing table.
    #[error("failed to migrate table '{table}': {reason}")]
    Migrate { table: String, reason: String },

    /// Failed to read a row.
    #[error("failed to read row {id}: {reason}")]
    Read { id: i64, reason: String },

    /// Failed to write a row.
    #[error("failed to write row {id}: {reason}")]
    Write { id: i64, reason: String },

    /// Failed to count rows.
    #[error("failed to count rows: {reason}")]
    Count { reason: String },

    /// The backend was closed and can no longer serve requests.
    #[error("storage backend is closed")]
    Closed,

    /// No backend is attached (it could not be opened at startup).
    #[error("storage is unavailable: {reason}")]
    Unavailable { reason: String },
}
