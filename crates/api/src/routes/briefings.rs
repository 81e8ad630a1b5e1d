//! Route definitions for the `/briefings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::briefings;
use crate::state::AppState;

/// Routes mounted at `/briefings`.
///
/// ```text
/// POST   /              -> submit (public: site form and chatbot)
/// GET    /              -> list (admin, ?q= filter)
/// GET    /{id}          -> get (admin)
/// PUT    /{id}          -> update (admin)
/// DELETE /{id}          -> delete (admin)
/// POST   /{id}/convert  -> convert into a project (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(briefings::list).post(briefings::submit))
        .route(
            "/{id}",
            get(briefings::get)
                .put(briefings::update)
                .delete(briefings::delete),
        )
        .route("/{id}/convert", post(briefings::convert))
}
