//! Storage backend abstraction for Folio.
//!
//! This crate defines the [`DocumentBackend`] trait — a single-table,
//! row-oriented persistence interface that knows nothing about portfolio
//! content, seeding, or credentials. Rows are identified by an integer id and
//! carry one serialized text payload. The document store in `folio-core`
//! decides what goes into that payload and which row it lives in.
//!
//! Three implementations are provided:
//!
//! - [`SqliteBackend`] — production default, a single SQLite file (feature `sqlite-backend`)
//! - [`PostgresBackend`] — hosted alternative (feature `postgres-backend`)
//! - [`MemoryBackend`] — in-memory, for testing and throwaway dev servers

mod error;
mod memory;
#[cfg(feature = "postgres-backend")]
mod postgres_backend;
#[cfg(feature = "sqlite-backend")]
mod sqlite_backend;

pub use error::StorageError;
pub use memory::MemoryBackend;
#[cfg(feature = "postgres-backend")]
pub use postgres_backend::PostgresBackend;
#[cfg(feature = "sqlite-backend")]
pub use sqlite_backend::SqliteBackend;

/// Name of the single table every backend persists into.
pub const TABLE_NAME: &str = "portfolio";

/// A pluggable single-table document backend.
///
/// The table layout is fixed: `portfolio (id INTEGER PRIMARY KEY, data TEXT NOT NULL)`.
/// Payloads are opaque text — always serialized by the caller before
/// reaching this layer.
///
/// Each operation is a single statement, so the backend's own atomicity
/// guarantee is the only concurrency control: concurrent writes to the same
/// row apply in arrival order and the last one wins.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait DocumentBackend: Send + Sync + 'static {
    /// Create the backing table if it does not exist.
    ///
    /// Idempotent — running it against an already-migrated database is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Migrate`] if the schema cannot be created, or
    /// [`StorageError::Closed`] after [`close`](DocumentBackend::close).
    async fn migrate(&self) -> Result<(), StorageError>;

    /// Retrieve the payload stored under `id`.
    ///
    /// Returns `Ok(None)` if the row does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn load(&self, id: i64) -> Result<Option<String>, StorageError>;

    /// Insert a row only if no row with `id` exists yet.
    ///
    /// Returns `true` if the row was inserted, `false` if one was already
    /// present. Never overwrites.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn insert_if_absent(&self, id: i64, data: &str) -> Result<bool, StorageError>;

    /// Store a payload under `id`, replacing any existing payload.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn store(&self, id: i64, data: &str) -> Result<(), StorageError>;

    /// Count the rows in the table.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Count`] if the underlying backend fails.
    async fn count(&self) -> Result<u64, StorageError>;

    /// Release the backend's connections.
    ///
    /// Every operation after this call fails with [`StorageError::Closed`].
    /// Closing twice is a no-op.
    async fn close(&self);

    /// Whether [`close`](DocumentBackend::close) has been called.
    fn is_closed(&self) -> bool;
}
