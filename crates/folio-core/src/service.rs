//! Content service: the facade callers talk to.
//!
//! Combines the [`DocumentStore`] and the [`AccessGuard`]. Reads need no
//! credential; writes re-present the secret on every call. There are no
//! sessions and no internal retries — every fault goes straight back to the
//! caller, who owns the retry decision.

use tracing::{info, warn};

use crate::content::Venture;
use crate::document::PortfolioDocument;
use crate::error::ContentError;
use crate::guard::AccessGuard;
use crate::store::DocumentStore;

/// Read, authenticate, and replace the portfolio document.
#[derive(Debug)]
pub struct ContentService {
    store: DocumentStore,
    guard: AccessGuard,
}

impl ContentService {
    #[must_use]
    pub fn new(store: DocumentStore, guard: AccessGuard) -> Self {
        Self { store, guard }
    }

    /// Prepare the store (table + seed). See [`DocumentStore::initialize`].
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Storage`] if the store is unavailable.
    pub async fn initialize(&self) -> Result<bool, ContentError> {
        self.store.initialize().await
    }

    /// The current document. Never fails; falls back to the built-in
    /// payload when storage cannot answer.
    pub async fn get_document(&self) -> PortfolioDocument {
        self.store.read().await
    }

    /// Check a credential without doing anything else. Used to gate entry
    /// into an editing view.
    #[must_use]
    pub fn authenticate(&self, supplied: Option<&str>) -> bool {
        let ok = self.guard.verify(supplied);
        if !ok {
            warn!(configured = self.guard.is_configured(), "authentication rejected");
        }
        ok
    }

    /// Replace the whole document if `supplied` is the admin secret.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Unauthorized`] if the credential is wrong or no
    ///   secret is configured. Nothing is written.
    /// - [`ContentError::Storage`] if the write did not take effect.
    pub async fn replace_document(
        &self,
        supplied: Option<&str>,
        document: PortfolioDocument,
    ) -> Result<(), ContentError> {
        if !self.guard.verify(supplied) {
            warn!(
                configured = self.guard.is_configured(),
                "rejected portfolio write: invalid credential"
            );
            return Err(ContentError::Unauthorized);
        }

        self.store.write(&document).await?;
        info!("portfolio document replaced");
        Ok(())
    }

    /// Look up the venture whose detail route is `/{slug}`.
    ///
    /// Returns `None` if there is no such venture or the matching entry is
    /// not a venture record. Other sections of the document are not
    /// consulted.
    pub async fn venture(&self, slug: &str) -> Option<Venture> {
        match self.store.read().await.venture(slug) {
            Ok(venture) => venture,
            Err(e) => {
                warn!(slug, error = %e, "venture entry does not match the typed view");
                None
            }
        }
    }

    /// Whether the underlying store can currently accept writes.
    #[must_use]
    pub fn storage_available(&self) -> bool {
        self.store.is_available()
    }

    /// Whether an admin secret is configured.
    #[must_use]
    pub fn editing_enabled(&self) -> bool {
        self.guard.is_configured()
    }

    /// Release the store. See [`DocumentStore::close`].
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use folio_storage::{MemoryBackend, StorageError};
    use serde_json::json;

    use super::*;

    async fn service(secret: Option<&str>) -> ContentService {
        let store = DocumentStore::new(Arc::new(MemoryBackend::new()));
        let svc = ContentService::new(store, AccessGuard::new(secret.map(str::to_owned)));
        svc.initialize().await.unwrap();
        svc
    }

    #[tokio::test]
    async fn hunter2_scenario() {
        let svc = service(Some("hunter2")).await;
        let doc = svc.get_document().await;
        assert_eq!(doc.as_value()["hero"]["name"], "Mahdi Ashabil");

        let x = json!({"hero": {"name": "X"}});
        svc.replace_document(Some("hunter2"), PortfolioDocument::new(x.clone()))
            .await
            .unwrap();
        assert_eq!(svc.get_document().await.into_value(), x);

        let result = svc
            .replace_document(Some("nope"), PortfolioDocument::new(json!({"hero": {"name": "Y"}})))
            .await;
        assert!(matches!(result, Err(ContentError::Unauthorized)));
        assert_eq!(svc.get_document().await.into_value(), x);
    }

    #[tokio::test]
    async fn wrong_secret_leaves_document_unchanged() {
        let svc = service(Some("S")).await;
        let before = svc.get_document().await;
        let result = svc
            .replace_document(Some("wrong"), PortfolioDocument::new(json!({"a": 1})))
            .await;
        assert!(matches!(result, Err(ContentError::Unauthorized)));
        assert_eq!(svc.get_document().await, before);
    }

    #[tokio::test]
    async fn absent_secret_denies_authentication_and_writes() {
        let svc = service(None).await;
        assert!(!svc.editing_enabled());
        assert!(!svc.authenticate(Some("")));
        assert!(!svc.authenticate(Some("anything")));
        assert!(!svc.authenticate(None));

        let result = svc
            .replace_document(None, PortfolioDocument::new(json!({})))
            .await;
        assert!(matches!(result, Err(ContentError::Unauthorized)));
    }

    #[tokio::test]
    async fn authenticate_reports_match() {
        let svc = service(Some("S")).await;
        assert!(svc.authenticate(Some("S")));
        assert!(!svc.authenticate(Some("s")));
    }

    #[tokio::test]
    async fn roundtrip_fidelity_for_varied_values() {
        let svc = service(Some("S")).await;
        let values = [
            json!({}),
            json!([]),
            json!(null),
            json!("just a string"),
            json!(42),
            json!({"ventures": [{"details": {"links": [{"type": "Globe", "extra": [1, 2]}]}}]}),
        ];
        for value in values {
            svc.replace_document(Some("S"), PortfolioDocument::new(value.clone()))
                .await
                .unwrap();
            assert_eq!(svc.get_document().await.into_value(), value);
        }
    }

    #[tokio::test]
    async fn storage_fault_propagates_on_write_only() {
        let svc = ContentService::new(
            DocumentStore::detached("no database"),
            AccessGuard::new(Some("S".to_owned())),
        );
        assert!(!svc.storage_available());
        assert_eq!(svc.get_document().await, PortfolioDocument::builtin());

        let result = svc
            .replace_document(Some("S"), PortfolioDocument::new(json!({"a": 1})))
            .await;
        assert!(matches!(
            result,
            Err(ContentError::Storage(StorageError::Unavailable { .. }))
        ));
    }

    #[tokio::test]
    async fn unauthorized_is_checked_before_storage() {
        let svc = ContentService::new(
            DocumentStore::detached("no database"),
            AccessGuard::new(Some("S".to_owned())),
        );
        let result = svc
            .replace_document(Some("bad"), PortfolioDocument::new(json!({})))
            .await;
        assert!(matches!(result, Err(ContentError::Unauthorized)));
    }

    #[tokio::test]
    async fn venture_lookup_follows_current_document() {
        let svc = service(Some("S")).await;
        let wrapify = svc.venture("wrapify").await.unwrap();
        assert_eq!(wrapify.role.as_deref(), Some("Owner & Founder"));

        svc.replace_document(
            Some("S"),
            PortfolioDocument::new(json!({"ventures": [{"title": "New", "link": "/new"}]})),
        )
        .await
        .unwrap();
        assert!(svc.venture("wrapify").await.is_none());
        assert_eq!(svc.venture("new").await.unwrap().title.as_deref(), Some("New"));
    }

    #[tokio::test]
    async fn venture_lookup_tolerates_odd_documents() {
        let svc = service(Some("S")).await;
        svc.replace_document(Some("S"), PortfolioDocument::new(json!({"ventures": 7})))
            .await
            .unwrap();
        assert!(svc.venture("wrapify").await.is_none());
    }

    #[tokio::test]
    async fn venture_lookup_survives_unrelated_type_mismatch() {
        let svc = service(Some("S")).await;
        svc.replace_document(
            Some("S"),
            PortfolioDocument::new(json!({
                "achievements": [{"title": "T", "year": 2024}],
                "ventures": [{"title": "X", "link": "/x"}]
            })),
        )
        .await
        .unwrap();
        assert_eq!(svc.venture("x").await.unwrap().title.as_deref(), Some("X"));
    }

    #[tokio::test]
    async fn shutdown_then_reads_degrade() {
        let svc = service(Some("S")).await;
        svc.replace_document(Some("S"), PortfolioDocument::new(json!({"a": 1})))
            .await
            .unwrap();
        svc.shutdown().await;
        assert!(!svc.storage_available());
        assert_eq!(svc.get_document().await, PortfolioDocument::builtin());
    }
}
