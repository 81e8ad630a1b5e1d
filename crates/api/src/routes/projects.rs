//! Route definitions for the admin `/projects` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects` (all admin).
///
/// ```text
/// GET    /                                   -> list (?q= filter)
/// POST   /                                   -> create
/// GET    /{id}                               -> detail (versions + feedback)
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete
/// POST   /{id}/versions                      -> attach version
/// DELETE /{id}/versions/{vid}                -> delete version
/// PUT    /{id}/versions/{vid}/recommend      -> point recommended version
/// PUT    /{id}/versions/{vid}/final          -> point final version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/{id}/versions", post(projects::create_version))
        .route("/{id}/versions/{vid}", delete(projects::delete_version))
        .route(
            "/{id}/versions/{vid}/recommend",
            put(projects::recommend_version),
        )
        .route(
            "/{id}/versions/{vid}/final",
            put(projects::set_final_version),
        )
}
