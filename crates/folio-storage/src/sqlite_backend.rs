//! SQLite storage backend — the production default.
//!
//! Stores the portfolio in a single `portfolio` table inside one database
//! file. Uses `sqlx` with the Tokio runtime for fully async operations — no
//! `spawn_blocking` needed.
//!
//! Feature-gated behind `sqlite-backend`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::{DocumentBackend, StorageError};

/// A document backend backed by a SQLite database file.
///
/// Thread-safe via `SqlitePool` (connection pool). Cheap to clone.
///
/// # Examples
///
/// ```no_run
/// # use folio_storage::SqliteBackend;
/// # #[tokio::main]
/// # async fn main() {
/// let backend = SqliteBackend::open("./portfolio.db").await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
    location: PathBuf,
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl SqliteBackend {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the database file if it does not exist. The table itself is
    /// created by [`DocumentBackend::migrate`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if SQLite fails to open or create the
    /// database file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .map_err(|e| StorageError::Open {
                location: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "opened sqlite database");

        Ok(Self {
            pool,
            location: path.to_path_buf(),
        })
    }

    /// Open a private in-memory SQLite database.
    ///
    /// The pool is pinned to a single connection that never expires, because
    /// every SQLite in-memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the connection cannot be established.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StorageError::Open {
                location: ":memory:".to_owned(),
                reason: e.to_string(),
            }
        })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await
            .map_err(|e| StorageError::Open {
                location: ":memory:".to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pool,
            location: PathBuf::from(":memory:"),
        })
    }

    /// Return the location this database was opened from.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.pool.is_closed() {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentBackend for SqliteBackend {
    async fn migrate(&self) -> Result<(), StorageError> {
        self.ensure_open()?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS portfolio (\
                id   INTEGER PRIMARY KEY, \
                data TEXT    NOT NULL\
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Migrate {
            table: crate::TABLE_NAME.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    async fn load(&self, id: i64) -> Result<Option<String>, StorageError> {
        self.ensure_open()?;
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM portfolio WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Read {
                id,
                reason: e.to_string(),
            })?;

        Ok(row.map(|(data,)| data))
    }

    async fn insert_if_absent(&self, id: i64, data: &str) -> Result<bool, StorageError> {
        self.ensure_open()?;
        let result = sqlx::query(
            "INSERT INTO portfolio (id, data) VALUES (?1, ?2) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Write {
            id,
            reason: e.to_string(),
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn store(&self, id: i64, data: &str) -> Result<(), StorageError> {
        self.ensure_open()?;
        sqlx::query(
            "INSERT INTO portfolio (id, data) VALUES (?1, ?2) \
             ON CONFLICT (id) DO UPDATE SET data = excluded.data",
        )
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Write {
            id,
            reason: e.to_string(),
        })?;

        Ok(())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        self.ensure_open()?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM portfolio")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Count {
                reason: e.to_string(),
            })?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn migrated() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().await.unwrap();
        backend.migrate().await.unwrap();
        backend
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let backend = migrated().await;
        backend.migrate().await.unwrap();
        backend.migrate().await.unwrap();
        assert_eq!(backend.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn load_missing_row_returns_none() {
        let backend = migrated().await;
        assert_eq!(backend.load(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn load_before_migrate_is_a_read_error() {
        let backend = SqliteBackend::in_memory().await.unwrap();
        let result = backend.load(1).await;
        assert!(matches!(result, Err(StorageError::Read { id: 1, .. })));
    }

    #[tokio::test]
    async fn insert_if_absent_keeps_first_payload() {
        let backend = migrated().await;
        assert!(backend.insert_if_absent(1, r#"{"a":1}"#).await.unwrap());
        assert!(!backend.insert_if_absent(1, r#"{"b":2}"#).await.unwrap());
        assert_eq!(backend.load(1).await.unwrap().as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(backend.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn store_upserts_single_row() {
        let backend = migrated().await;
        backend.store(1, "first").await.unwrap();
        backend.store(1, "second").await.unwrap();
        assert_eq!(backend.load(1).await.unwrap().as_deref(), Some("second"));
        assert_eq!(backend.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn closed_pool_reports_closed() {
        let backend = migrated().await;
        backend.close().await;
        assert!(backend.is_closed());
        assert!(matches!(backend.load(1).await, Err(StorageError::Closed)));
        assert!(matches!(backend.store(1, "x").await, Err(StorageError::Closed)));
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.db");

        let backend = SqliteBackend::open(&path).await.unwrap();
        backend.migrate().await.unwrap();
        backend.store(1, "persisted").await.unwrap();
        backend.close().await;

        let reopened = SqliteBackend::open(&path).await.unwrap();
        reopened.migrate().await.unwrap();
        assert_eq!(reopened.load(1).await.unwrap().as_deref(), Some("persisted"));
        assert_eq!(reopened.location(), path.as_path());
    }
}
