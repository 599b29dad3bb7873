//! In-memory storage backend for testing.
//!
//! This backend stores all rows in a `BTreeMap` behind a `RwLock`. It is not
//! persistent — all data is lost when the process exits. Use this for unit
//! tests, integration tests, and throwaway dev servers where you need a real
//! backend without touching disk.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::{DocumentBackend, StorageError};

/// An in-memory document backend backed by a `BTreeMap`.
///
/// Thread-safe and async-compatible. Clones share the same rows and the same
/// closed flag, so closing one clone closes them all.
///
/// # Examples
///
/// ```
/// # use folio_storage::{MemoryBackend, DocumentBackend};
/// # #[tokio::main]
/// # async fn main() {
/// let backend = MemoryBackend::new();
/// backend.store(1, "{}").await.unwrap();
/// let val = backend.load(1).await.unwrap();
/// assert_eq!(val.as_deref(), Some("{}"));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    rows: Arc<RwLock<BTreeMap<i64, String>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DocumentBackend for MemoryBackend {
    async fn migrate(&self) -> Result<(), StorageError> {
        self.ensure_open()
    }

    async fn load(&self, id: i64) -> Result<Option<String>, StorageError> {
        self.ensure_open()?;
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn insert_if_absent(&self, id: i64, data: &str) -> Result<bool, StorageError> {
        self.ensure_open()?;
        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Ok(false);
        }
        rows.insert(id, data.to_owned());
        Ok(true)
    }

    async fn store(&self, id: i64, data: &str) -> Result<(), StorageError> {
        self.ensure_open()?;
        let mut rows = self.rows.write().await;
        rows.insert(id, data.to_owned());
        Ok(())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        self.ensure_open()?;
        let rows = self.rows.read().await;
        Ok(rows.len() as u64)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
