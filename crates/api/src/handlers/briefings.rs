//! Handlers for the `/briefings` resource.
//!
//! Submission is public (the site form and the chatbot both post here);
//! everything else is admin-only. Conversion goes through the shared project
//! creation routine and records the briefing as the project's provenance.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use harmonia_core::error::CoreError;
use harmonia_core::notify::NotificationPurpose;
use harmonia_core::types::DbId;
use harmonia_db::models::briefing::{Briefing, CreateBriefing, UpdateBriefing};
use harmonia_db::models::project::CreateProject;
use harmonia_db::repositories::{BriefingRepo, ProjectRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{generate_preview_code, load_and_cache, ListQuery, ProjectWithShare};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /briefings/{id}/convert`.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub briefing: Briefing,
    pub project: ProjectWithShare,
}

/// POST /api/v1/briefings (public)
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateBriefing>,
) -> AppResult<impl IntoResponse> {
    if input.client_name.trim().is_empty()
        || input.client_email.trim().is_empty()
        || input.message.trim().is_empty()
    {
        return Err(AppError::Core(CoreError::Validation(
            "client_name, client_email, and message are required".into(),
        )));
    }

    let briefing = BriefingRepo::create(&state.pool, &input).await?;

    state
        .notifier
        .notify(
            NotificationPurpose::Briefing,
            serde_json::json!({
                "event": "briefing_submitted",
                "briefing_id": briefing.id,
                "client_name": briefing.client_name,
                "client_email": briefing.client_email,
                "package_type": briefing.package_type,
            }),
        )
        .await;

    tracing::info!(briefing_id = briefing.id, "Briefing submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: briefing })))
}

/// GET /api/v1/briefings
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<Briefing>>>> {
    let briefings = BriefingRepo::list(&state.pool, query.q.as_deref()).await?;
    Ok(Json(DataResponse { data: briefings }))
}

/// GET /api/v1/briefings/{id}
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Briefing>>> {
    let briefing = find_briefing(&state, id).await?;
    Ok(Json(DataResponse { data: briefing }))
}

/// PUT /api/v1/briefings/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBriefing>,
) -> AppResult<Json<DataResponse<Briefing>>> {
    let briefing = BriefingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Briefing",
            id,
        }))?;
    Ok(Json(DataResponse { data: briefing }))
}

/// DELETE /api/v1/briefings/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = BriefingRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Briefing",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/briefings/{id}/convert
///
/// Create a project from the briefing and mark the briefing `converted`.
/// Converting twice is rejected with 409: the conditional status update
/// claims the briefing first, so two racing converts cannot both create a
/// project (same one-shot shape as the payment confirm hook).
pub async fn convert(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let briefing = match BriefingRepo::mark_converted(&state.pool, id).await? {
        Some(briefing) => briefing,
        None => {
            // Distinguish a repeat conversion from a bad id for the message.
            return match BriefingRepo::find_by_id(&state.pool, id).await? {
                Some(_) => Err(AppError::Core(CoreError::Conflict(
                    "Briefing was already converted into a project".into(),
                ))),
                None => Err(AppError::Core(CoreError::NotFound {
                    entity: "Briefing",
                    id,
                })),
            };
        }
    };

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            preview_code: Some(generate_preview_code()),
            client_name: briefing.client_name.clone(),
            client_email: briefing.client_email.clone(),
            package_type: briefing.package_type.clone(),
            briefing_id: Some(briefing.id),
            order_id: None,
            expires_at: None,
        },
    )
    .await?;
    load_and_cache(&state, project.clone()).await?;

    tracing::info!(
        briefing_id = id,
        project_id = project.id,
        user_id = admin.user_id,
        "Briefing converted into project"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ConvertResponse {
                briefing,
                project: ProjectWithShare::new(project),
            },
        }),
    ))
}

async fn find_briefing(state: &AppState, id: DbId) -> AppResult<Briefing> {
    BriefingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Briefing",
            id,
        }))
}
