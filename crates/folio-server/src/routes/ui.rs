//! Single-page app hosting.
//!
//! Everything that is not an API route is served from the built app
//! directory. Paths that do not name a file fall through to `index.html`, so
//! client-side routes like `/wrapify` or `/admin` load the app. When the app
//! has not been built, the fallback answers `404` with a plain hint.

use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{MethodRouter, get};
use tower_http::services::ServeDir;

/// Build the static file service for `static_dir`.
pub fn spa_service(static_dir: &Path) -> ServeDir<MethodRouter> {
    let index = static_dir.join("index.html");
    ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .fallback(get(move || index_page(index.clone())))
}

async fn index_page(index: PathBuf) -> Response {
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::debug!(path = %index.display(), error = %e, "index.html not readable");
            (
                StatusCode::NOT_FOUND,
                "Application not built. Build the frontend into the static directory first.",
            )
                .into_response()
        }
    }
}
