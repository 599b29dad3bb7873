//! Error types for `folio-core`.
//!
//! Each error variant carries enough context to diagnose the problem without
//! a debugger. Credential errors never include the supplied or configured
//! secret.

use folio_storage::StorageError;

/// Errors from content operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The supplied credential did not match the configured secret, or no
    /// secret is configured.
    #[error("invalid credential")]
    Unauthorized,

    /// A payload could not be parsed or serialized as JSON.
    #[error("malformed document: {reason}")]
    Malformed { reason: String },

    /// The backing store is unavailable or failed.
    #[error("content storage error: {0}")]
    Storage(#[from] StorageError),
}
