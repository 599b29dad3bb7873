//! Document store: the one persisted portfolio row.
//!
//! The store wraps a [`DocumentBackend`] and owns the policy around it:
//!
//! - `initialize` creates the table and seeds the built-in payload once.
//! - `read` is best-effort. A missing backend, a failing backend, an absent
//!   row, or an unparseable row all fall back to the built-in payload.
//! - `write` is strict. Any storage failure reaches the caller.
//!
//! A store is *detached* when its backend could not be opened at startup. A
//! detached store still serves reads (the built-in payload) and rejects
//! writes with [`StorageError::Unavailable`].

use std::fmt;
use std::sync::Arc;

use folio_storage::{DocumentBackend, StorageError};
use tracing::{debug, info, warn};

use crate::document::PortfolioDocument;
use crate::error::ContentError;

/// Row id of the singleton document.
pub const DOCUMENT_ID: i64 = 1;

enum Attachment {
    Attached(Arc<dyn DocumentBackend>),
    Detached { reason: String },
}

/// Persistence for the singleton [`PortfolioDocument`].
pub struct DocumentStore {
    attachment: Attachment,
}

impl DocumentStore {
    /// Create a store over an opened backend.
    ///
    /// Call [`initialize`](Self::initialize) before serving reads.
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            attachment: Attachment::Attached(backend),
        }
    }

    /// Create a store with no backend, e.g. because the database could not
    /// be opened.
    #[must_use]
    pub fn detached(reason: impl Into<String>) -> Self {
        Self {
            attachment: Attachment::Detached {
                reason: reason.into(),
            },
        }
    }

    /// Whether a backend is attached and still open.
    #[must_use]
    pub fn is_available(&self) -> bool {
        match &self.attachment {
            Attachment::Attached(backend) => !backend.is_closed(),
            Attachment::Detached { .. } => false,
        }
    }

    /// Ensure the table exists and seed the built-in payload if no document
    /// is stored yet.
    ///
    /// Safe to call any number of times: an existing document is never
    /// overwritten and no second row is ever created. Returns `true` if this
    /// call seeded the document.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Storage`] if the store is detached or the
    /// backend fails.
    pub async fn initialize(&self) -> Result<bool, ContentError> {
        let backend = self.backend()?;
        backend.migrate().await?;

        let payload = PortfolioDocument::builtin().to_json()?;
        let seeded = backend.insert_if_absent(DOCUMENT_ID, &payload).await?;
        if seeded {
            info!("seeded built-in portfolio document");
        } else {
            debug!("portfolio document already present, skipping seed");
        }
        Ok(seeded)
    }

    /// Return the current document, or the built-in payload if the store
    /// cannot produce one. Never fails.
    pub async fn read(&self) -> PortfolioDocument {
        let backend = match self.backend() {
            Ok(backend) => backend,
            Err(e) => {
                warn!(error = %e, "document store unavailable, serving built-in document");
                return PortfolioDocument::builtin();
            }
        };

        match backend.load(DOCUMENT_ID).await {
            Ok(Some(text)) => match PortfolioDocument::from_json(&text) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(error = %e, "stored document is not valid JSON, serving built-in document");
                    PortfolioDocument::builtin()
                }
            },
            Ok(None) => {
                info!("no document stored, serving built-in document");
                PortfolioDocument::builtin()
            }
            Err(e) => {
                warn!(error = %e, "failed to load document, serving built-in document");
                PortfolioDocument::builtin()
            }
        }
    }

    /// Replace the stored document wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Storage`] if the store is detached or the
    /// backend fails. The caller needs to know the write did not land.
    pub async fn write(&self, document: &PortfolioDocument) -> Result<(), ContentError> {
        let backend = self.backend()?;
        let payload = document.to_json()?;
        backend.store(DOCUMENT_ID, &payload).await?;
        debug!(bytes = payload.len(), "portfolio document written");
        Ok(())
    }

    /// Release the backend. Further reads serve the built-in payload and
    /// further writes fail. Idempotent.
    pub async fn close(&self) {
        if let Attachment::Attached(backend) = &self.attachment {
            if !backend.is_closed() {
                backend.close().await;
                info!("document store closed");
            }
        }
    }

    fn backend(&self) -> Result<&Arc<dyn DocumentBackend>, StorageError> {
        match &self.attachment {
            Attachment::Attached(backend) if backend.is_closed() => Err(StorageError::Closed),
            Attachment::Attached(backend) => Ok(backend),
            Attachment::Detached { reason } => Err(StorageError::Unavailable {
                reason: reason.clone(),
            }),
        }
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("available", &self.is_available())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use folio_storage::{MemoryBackend, SqliteBackend};
    use serde_json::json;

    use super::*;

    fn memory_store() -> (DocumentStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        let store = DocumentStore::new(Arc::new(backend.clone()));
        (store, backend)
    }

    #[tokio::test]
    async fn initialize_seeds_once() {
        let (store, backend) = memory_store();
        assert!(store.initialize().await.unwrap());
        assert!(!store.initialize().await.unwrap());
        assert!(!store.initialize().await.unwrap());
        assert_eq!(backend.count().await.unwrap(), 1);
        assert_eq!(store.read().await, PortfolioDocument::builtin());
    }

    #[tokio::test]
    async fn initialize_keeps_prior_write() {
        let (store, backend) = memory_store();
        store.initialize().await.unwrap();
        let doc = PortfolioDocument::new(json!({"hero": {"name": "X"}}));
        store.write(&doc).await.unwrap();

        for _ in 0..3 {
            store.initialize().await.unwrap();
        }
        assert_eq!(backend.count().await.unwrap(), 1);
        assert_eq!(store.read().await, doc);
    }

    #[tokio::test]
    async fn read_without_row_serves_builtin() {
        let (store, _backend) = memory_store();
        assert_eq!(store.read().await, PortfolioDocument::builtin());
    }

    #[tokio::test]
    async fn read_with_corrupt_row_serves_builtin() {
        let (store, backend) = memory_store();
        backend.store(DOCUMENT_ID, "{truncated").await.unwrap();
        assert_eq!(store.read().await, PortfolioDocument::builtin());
    }

    #[tokio::test]
    async fn detached_store_reads_builtin_and_rejects_writes() {
        let store = DocumentStore::detached("disk full");
        assert!(!store.is_available());
        assert_eq!(store.read().await, PortfolioDocument::builtin());

        let result = store.write(&PortfolioDocument::new(json!({}))).await;
        assert!(matches!(
            result,
            Err(ContentError::Storage(StorageError::Unavailable { .. }))
        ));
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn closed_store_degrades_reads_and_fails_writes() {
        let (store, _backend) = memory_store();
        store.initialize().await.unwrap();
        store
            .write(&PortfolioDocument::new(json!({"a": 1})))
            .await
            .unwrap();

        store.close().await;
        store.close().await;
        assert!(!store.is_available());
        assert_eq!(store.read().await, PortfolioDocument::builtin());

        let result = store.write(&PortfolioDocument::new(json!({"b": 2}))).await;
        assert!(matches!(
            result,
            Err(ContentError::Storage(StorageError::Closed))
        ));
    }

    #[tokio::test]
    async fn write_replaces_whole_payload() {
        let (store, _backend) = memory_store();
        store.initialize().await.unwrap();
        store
            .write(&PortfolioDocument::new(json!({"a": 1})))
            .await
            .unwrap();
        store
            .write(&PortfolioDocument::new(json!({"b": 2})))
            .await
            .unwrap();
        assert_eq!(store.read().await.into_value(), json!({"b": 2}));
    }

    #[tokio::test]
    async fn sqlite_store_seeds_once_and_roundtrips() {
        let backend = SqliteBackend::in_memory().await.unwrap();
        let store = DocumentStore::new(Arc::new(backend.clone()));

        assert!(store.initialize().await.unwrap());
        assert!(!store.initialize().await.unwrap());
        assert_eq!(backend.count().await.unwrap(), 1);

        let value = json!({"unicode": "গিফট • ✓", "deep": [[{"x": null}]], "f": -0.25});
        store.write(&PortfolioDocument::new(value.clone())).await.unwrap();
        assert_eq!(store.read().await.into_value(), value);
    }
}
