//! Route definitions for the admin `/webhooks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks` (all admin).
///
/// ```text
/// GET /                       -> list configured endpoints
/// GET /{purpose}              -> get the endpoint for a purpose
/// PUT /{purpose}              -> configure (upsert) the endpoint
/// GET /{purpose}/deliveries   -> delivery history (paginated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(webhooks::list_endpoints))
        .route(
            "/{purpose}",
            get(webhooks::get_endpoint).put(webhooks::configure_endpoint),
        )
        .route("/{purpose}/deliveries", get(webhooks::list_deliveries))
}
