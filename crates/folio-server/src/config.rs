//! Server configuration for Folio.
//!
//! Loads configuration from environment variables with sensible defaults.
//! `main` loads a `.env` file first (if present), so every setting can live
//! there during development.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default port, matching what the site has always been served on.
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Storage backend type.
    pub storage_backend: StorageBackendType,
    /// Admin secret guarding writes. `None` disables editing entirely.
    pub admin_password: Option<String>,
    /// Directory holding the built single-page app.
    pub static_dir: PathBuf,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

/// Supported storage backend types.
#[derive(Clone, PartialEq, Eq)]
pub enum StorageBackendType {
    /// In-memory (development only, edits lost on restart).
    Memory,
    /// SQLite database file.
    Sqlite { path: PathBuf },
    /// PostgreSQL database.
    Postgres { url: String },
}

impl fmt::Debug for StorageBackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Sqlite { path } => f.debug_struct("Sqlite").field("path", path).finish(),
            Self::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("url", &"[redacted]")
                .finish(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("storage_backend", &self.storage_backend)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "[redacted]"))
            .field("static_dir", &self.static_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on, on all interfaces (default: `3000`)
    /// - `FOLIO_BIND_ADDR` — full bind address (overrides `PORT`)
    /// - `FOLIO_STORAGE` — `sqlite`, `postgres`, or `memory` (default: `sqlite`)
    /// - `FOLIO_DATABASE_PATH` — SQLite file (default: `./portfolio.db`)
    /// - `DATABASE_URL` — PostgreSQL connection string (when `FOLIO_STORAGE=postgres`)
    /// - `ADMIN_PASSWORD` — admin secret; unset or empty disables editing
    /// - `FOLIO_STATIC_DIR` — built SPA directory (default: `./dist`)
    /// - `FOLIO_LOG_LEVEL` — log filter when `RUST_LOG` is unset (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_addr = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT));

        // Priority: FOLIO_BIND_ADDR > PORT > default 0.0.0.0:3000
        let bind_addr = if let Some(addr) = lookup("FOLIO_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let storage_backend = match lookup("FOLIO_STORAGE")
            .unwrap_or_else(|| "sqlite".to_owned())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackendType::Memory,
            "postgres" | "postgresql" => {
                let url = lookup("DATABASE_URL")
                    .unwrap_or_else(|| "postgres://localhost/folio".to_owned());
                StorageBackendType::Postgres { url }
            }
            _ => StorageBackendType::Sqlite {
                path: lookup("FOLIO_DATABASE_PATH")
                    .map_or_else(|| PathBuf::from("./portfolio.db"), PathBuf::from),
            },
        };

        let admin_password = lookup("ADMIN_PASSWORD").filter(|p| !p.is_empty());

        let static_dir = lookup("FOLIO_STATIC_DIR")
            .map_or_else(|| PathBuf::from("./dist"), PathBuf::from);

        let log_level = lookup("FOLIO_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        Self {
            bind_addr,
            storage_backend,
            admin_password,
            static_dir,
            log_level,
        }
    }
}
