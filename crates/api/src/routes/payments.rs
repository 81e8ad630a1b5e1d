//! Route definitions for the `/payments` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST /checkout              -> start a hosted checkout (public)
/// POST /{order_id}/confirm    -> confirm payment, create project (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(payments::start_checkout))
        .route("/{order_id}/confirm", post(payments::confirm))
}
