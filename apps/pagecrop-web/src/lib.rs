//! pagecrop web application.
//!
//! Serves the upload/select/crop/download flow:
//! - `GET /` — session status page
//! - `POST /upload` — receive a PDF, count its pages
//! - `POST /process` — extract and crop the selected pages
//! - `GET /download/:filename` — serve a produced file as an attachment

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod page;
pub mod session;
pub mod state;

pub use state::AppState;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Build the application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload))
        .route("/process", post(handlers::process))
        .route("/download/:filename", get(handlers::download))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
