//! Admin login route: `/api/login`
//!
//! Checks the password and nothing else. No session or token is issued;
//! every later write presents the password again.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::portfolio::SuccessResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Build the login router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/login", post(login))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(body) = body?;

    if state.content.authenticate(body.password.as_deref()) {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(AppError::Unauthorized("invalid password".to_owned()))
    }
}
