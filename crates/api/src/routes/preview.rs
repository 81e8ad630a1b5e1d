//! Route definitions for the public `/preview` surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::preview;
use crate::state::AppState;

/// Routes mounted at `/preview`.
///
/// ```text
/// GET  /{token}           -> resolve a preview link
/// POST /{token}/feedback  -> submit client feedback
/// POST /{token}/approve   -> approve the project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{token}", get(preview::get_preview))
        .route("/{token}/feedback", post(preview::submit_feedback))
        .route("/{token}/approve", post(preview::approve))
}
