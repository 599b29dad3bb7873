//! Health route: `/api/health`

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Build the health router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub editing_enabled: bool,
    pub static_dir: String,
    pub app_built: bool,
}

/// Always `200`; a detached or closed store shows up in `storage`.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let app_built = tokio::fs::try_exists(state.static_dir.join("index.html"))
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: if state.content.storage_available() {
            "available"
        } else {
            "unavailable"
        },
        editing_enabled: state.content.editing_enabled(),
        static_dir: state.static_dir.display().to_string(),
        app_built,
    })
}
