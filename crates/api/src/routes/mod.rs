//! Route definitions, one module per resource.

pub mod auth;
pub mod briefings;
pub mod clients;
pub mod health;
pub mod invoices;
pub mod payments;
pub mod preview;
pub mod projects;
pub mod relay;
pub mod webhooks;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /preview/{token}                     resolve preview (public)
/// /preview/{token}/feedback            submit feedback (public)
/// /preview/{token}/approve             approve (public)
///
/// /payments/checkout                   start checkout (public)
/// /payments/{order_id}/confirm         confirm payment (public)
/// /orders                              list orders (admin)
///
/// /briefings                           submit (public POST), list (admin)
/// /briefings/{id}                      get, update, delete (admin)
/// /briefings/{id}/convert              convert into a project (admin)
///
/// /projects                            list, create (admin)
/// /projects/{id}                       detail, update, delete (admin)
/// /projects/{id}/versions              attach version (admin)
/// /projects/{id}/versions/{vid}        delete version (admin)
/// /projects/{id}/versions/{vid}/recommend   point recommended (admin)
/// /projects/{id}/versions/{vid}/final       point final (admin)
///
/// /clients, /invoices                  CRUD (admin)
///
/// /webhooks                            list endpoints (admin)
/// /webhooks/{purpose}                  get, configure (admin)
/// /webhooks/{purpose}/deliveries       delivery history (admin)
/// ```
///
/// The relay lives at root level (`POST /webhook`), not under `/api/v1`;
/// see [`relay::router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/preview", preview::router())
        .nest("/payments", payments::router())
        .route("/orders", get(handlers::payments::list_orders))
        .nest("/briefings", briefings::router())
        .nest("/projects", projects::router())
        .nest("/clients", clients::router())
        .nest("/invoices", invoices::router())
        .nest("/webhooks", webhooks::router())
}
