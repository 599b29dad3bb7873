//! Shared application state for Folio server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use std::path::PathBuf;
use std::sync::Arc;

use folio_core::service::ContentService;
use tokio::sync::Semaphore;

/// In-flight requests allowed across the credential-checking routes.
pub const CREDENTIAL_CONCURRENCY: usize = 16;

/// Shared application state passed to all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Read/authenticate/replace over the portfolio document.
    pub content: Arc<ContentService>,
    /// Directory the single-page app is served from.
    pub static_dir: PathBuf,
    /// One pool of permits shared by every credential-checking route.
    pub credential_permits: Arc<Semaphore>,
}

impl AppState {
    #[must_use]
    pub fn new(content: Arc<ContentService>, static_dir: PathBuf) -> Self {
        Self {
            content,
            static_dir,
            credential_permits: Arc::new(Semaphore::new(CREDENTIAL_CONCURRENCY)),
        }
    }
}
