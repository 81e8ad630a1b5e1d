//! Route definitions for the admin `/invoices` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::invoices;
use crate::state::AppState;

/// Routes mounted at `/invoices` (all admin).
///
/// ```text
/// GET    /      -> list (?q= filter on number)
/// POST   /      -> create
/// GET    /{id}  -> get
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(invoices::list).post(invoices::create))
        .route(
            "/{id}",
            get(invoices::get)
                .put(invoices::update)
                .delete(invoices::delete),
        )
}
