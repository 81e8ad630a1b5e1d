//! Route definitions for the admin `/clients` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients` (all admin).
///
/// ```text
/// GET    /      -> list (?q= filter)
/// POST   /      -> create
/// GET    /{id}  -> get
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list).post(clients::create))
        .route(
            "/{id}",
            get(clients::get)
                .put(clients::update)
                .delete(clients::delete),
        )
}
