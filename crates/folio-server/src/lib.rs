//! Folio HTTP server.
//!
//! Wires together the content service, storage backend, and HTTP routes into
//! a running Axum server. Serves the JSON API at `/api/*` and the built
//! single-page app everywhere else.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
