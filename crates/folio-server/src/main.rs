//! Folio server entry point.
//!
//! Opens the storage backend, seeds the portfolio document, and starts the
//! Axum HTTP server with graceful shutdown. The document store is closed
//! once the server has drained.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use folio_core::guard::AccessGuard;
use folio_core::service::ContentService;
use folio_core::store::DocumentStore;
use folio_storage::{DocumentBackend, MemoryBackend};

use folio_server::app::build_router;
use folio_server::config::{ServerConfig, StorageBackendType};
use folio_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal in production.
    let dotenv = dotenvy::dotenv();

    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    info!(
        storage = ?config.storage_backend,
        editing_enabled = config.admin_password.is_some(),
        "Folio starting"
    );
    if config.admin_password.is_none() {
        warn!("ADMIN_PASSWORD is not set, all edits will be rejected");
    }

    let content = Arc::new(build_content_service(&config).await?);
    check_static_dir(&config);

    let state = Arc::new(AppState::new(
        Arc::clone(&content),
        config.static_dir.clone(),
    ));
    let app = build_router(state);

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Folio server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    content.shutdown().await;
    info!("Folio server stopped");
    Ok(())
}

/// Open the configured backend and seed it.
///
/// A backend that cannot be opened or initialized does not stop the server:
/// the site keeps serving the built-in document and edits fail until the
/// storage problem is fixed and the server restarted.
async fn build_content_service(config: &ServerConfig) -> anyhow::Result<ContentService> {
    let store = match open_backend(&config.storage_backend).await? {
        Ok(backend) => DocumentStore::new(backend),
        Err(e) => {
            error!(error = %e, "failed to open storage, serving built-in document read-only");
            DocumentStore::detached(e.to_string())
        }
    };

    let service = ContentService::new(store, AccessGuard::new(config.admin_password.clone()));

    match service.initialize().await {
        Ok(true) => info!("storage initialized with built-in document"),
        Ok(false) => info!("storage initialized"),
        Err(e) => error!(error = %e, "storage initialization failed"),
    }

    Ok(service)
}

/// The outer `Result` is a configuration error (backend not compiled in);
/// the inner one is a runtime storage failure.
async fn open_backend(
    backend: &StorageBackendType,
) -> anyhow::Result<Result<Arc<dyn DocumentBackend>, folio_storage::StorageError>> {
    Ok(match backend {
        StorageBackendType::Memory => {
            info!("using in-memory storage (edits will not persist)");
            Ok(Arc::new(MemoryBackend::new()) as Arc<dyn DocumentBackend>)
        }
        #[cfg(feature = "sqlite-backend")]
        StorageBackendType::Sqlite { path } => {
            info!(path = %path.display(), "using SQLite storage");
            folio_storage::SqliteBackend::open(path)
                .await
                .map(|b| Arc::new(b) as Arc<dyn DocumentBackend>)
        }
        #[cfg(not(feature = "sqlite-backend"))]
        StorageBackendType::Sqlite { .. } => {
            anyhow::bail!("SQLite backend requested but feature 'sqlite-backend' is not enabled");
        }
        #[cfg(feature = "postgres-backend")]
        StorageBackendType::Postgres { url } => {
            info!(url = %"[redacted]", "using PostgreSQL storage");
            folio_storage::PostgresBackend::connect(url)
                .await
                .map(|b| Arc::new(b) as Arc<dyn DocumentBackend>)
        }
        #[cfg(not(feature = "postgres-backend"))]
        StorageBackendType::Postgres { .. } => {
            anyhow::bail!("PostgreSQL backend requested but feature 'postgres-backend' is not enabled");
        }
    })
}

fn check_static_dir(config: &ServerConfig) {
    let dir = &config.static_dir;
    if !dir.is_dir() {
        warn!(path = %dir.display(), "static directory not found, only the API will respond");
    } else if !dir.join("index.html").is_file() {
        warn!(path = %dir.display(), "index.html not found in static directory");
    } else {
        info!(path = %dir.display(), "serving single-page app");
    }
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
