//! PostgreSQL storage backend.
//!
//! Stores the portfolio in a single `portfolio` table. Rows are keyed by a
//! `BIGINT` id, payloads are opaque text serialized by the caller.
//!
//! Feature-gated behind `postgres-backend`. Uses `sqlx` with the Tokio
//! runtime for fully async operations — no `spawn_blocking` needed.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::{DocumentBackend, StorageError};

/// A document backend backed by PostgreSQL.
///
/// Thread-safe via `PgPool` (connection pool). All operations are fully async.
///
/// # Examples
///
/// ```no_run
/// # use folio_storage::PostgresBackend;
/// # #[tokio::main]
/// # async fn main() {
/// let backend = PostgresBackend::connect("postgres://localhost/folio").await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresBackend")
            .field("pool", &"[PgPool]")
            .finish_non_exhaustive()
    }
}

impl PostgresBackend {
    /// Connect to PostgreSQL.
    ///
    /// The table is created by [`DocumentBackend::migrate`], not here.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the connection fails. The URL is
    /// redacted from the error since it usually embeds a password.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::Open {
                location: "[redacted postgres url]".to_owned(),
                reason: e.to_string(),
            })?;

        tracing::debug!("connected to postgres");

        Ok(Self { pool })
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.pool.is_closed() {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentBackend for PostgresBackend {
    async fn migrate(&self) -> Result<(), StorageError> {
        self.ensure_open()?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS portfolio (\
                id   BIGINT PRIMARY KEY, \
                data TEXT   NOT NULL\
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
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM portfolio WHERE id = $1")
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
            "INSERT INTO portfolio (id, data) VALUES ($1, $2) \
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
            "INSERT INTO portfolio (id, data) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data",
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
