//! Core library for Folio.
//!
//! Holds the portfolio document model, the document store that persists it,
//! the access guard that protects writes, and the content service that
//! combines them. This crate depends on `folio-storage` for the backend
//! trait and knows nothing about HTTP.

pub mod content;
pub mod document;
pub mod error;
pub mod guard;
pub mod service;
pub mod store;
