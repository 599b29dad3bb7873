//! Portfolio document routes: `/api/portfolio`, `/api/ventures/{slug}`
//!
//! Reading is public and never fails. Replacing requires the admin password
//! in the request body alongside the full new document.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use folio_core::content::Venture;
use folio_core::document::PortfolioDocument;

use crate::error::AppError;
use crate::state::AppState;

/// Build the portfolio router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/portfolio", get(get_portfolio).post(replace_portfolio))
        .route("/api/ventures/{slug}", get(get_venture))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReplaceRequest {
    pub password: Option<String>,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Return the current document.
async fn get_portfolio(State(state): State<Arc<AppState>>) -> Json<PortfolioDocument> {
    Json(state.content.get_document().await)
}

/// Replace the whole document.
async fn replace_portfolio(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ReplaceRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(body) = body?;

    let Some(data) = body.data else {
        return Err(AppError::BadRequest(
            "request body must include a non-null `data` document".to_owned(),
        ));
    };

    state
        .content
        .replace_document(body.password.as_deref(), PortfolioDocument::new(data))
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Return one venture by its route slug.
async fn get_venture(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Venture>, AppError> {
    state
        .content
        .venture(&slug)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no venture at '/{slug}'")))
}
