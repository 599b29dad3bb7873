//! HTTP routes.

pub mod auth;
pub mod portfolio;
pub mod sys;
pub mod ui;
