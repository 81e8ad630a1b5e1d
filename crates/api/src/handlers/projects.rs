//! Admin handlers for the `/projects` resource: CRUD, the project detail
//! view, version attachments, and the recommended/final pointers.
//!
//! Also home of the shared detail loader and snapshot refresh used by the
//! public preview surface, and of the shared creation routine both the
//! briefing conversion and the payment confirmation go through.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use harmonia_core::cache::{FeedbackSnapshot, ProjectSnapshot, VersionSnapshot};
use harmonia_core::error::CoreError;
use harmonia_core::notify::NotificationPurpose;
use harmonia_core::preview::encode_share_token;
use harmonia_core::status::status_after_version_attached;
use harmonia_core::types::{DbId, Timestamp};
use harmonia_db::models::project::{CreateProject, Project, ProjectDetail, UpdateProject};
use harmonia_db::models::version::{CreateVersion, VersionOut};
use harmonia_db::repositories::{FeedbackRepo, ProjectRepo, VersionRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query string for list endpoints: `?q=` filters by a case-insensitive
/// substring on client name or email.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct AdminCreateProject {
    pub client_name: String,
    pub client_email: String,
    pub package_type: String,
    /// Generated if omitted.
    pub preview_code: Option<String>,
    pub expires_at: Option<Timestamp>,
}

/// A project together with its opaque share-link token.
#[derive(Debug, Serialize)]
pub struct ProjectWithShare {
    #[serde(flatten)]
    pub project: Project,
    pub share_token: String,
}

impl ProjectWithShare {
    pub fn new(project: Project) -> Self {
        Self {
            share_token: encode_share_token(project.id),
            project,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers (used by preview, payments, and briefing conversion too)
// ---------------------------------------------------------------------------

/// Generate a fresh human-shareable preview code, e.g. `HAR-2025-3FA2C1`.
///
/// Uniqueness is enforced by the database constraint; a collision surfaces
/// as a 409 and is practically unreachable with a 24-bit random suffix.
pub(crate) fn generate_preview_code() -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..6].to_uppercase();
    format!("HAR-{}-{}", Utc::now().format("%Y"), suffix)
}

/// Load a project's versions (with derived pointer flags) and feedback
/// history into the detail shape.
pub(crate) async fn load_detail(
    pool: &PgPool,
    project: Project,
) -> Result<ProjectDetail, sqlx::Error> {
    let versions = VersionRepo::list_for_project(pool, project.id)
        .await?
        .into_iter()
        .map(|v| VersionOut::derive(v, project.recommended_version_id, project.final_version_id))
        .collect();
    let feedback = FeedbackRepo::list_for_project(pool, project.id).await?;
    Ok(ProjectDetail {
        project,
        versions,
        feedback,
    })
}

/// Load the detail view and refresh the snapshot cache from it.
///
/// The cache is written after the authoritative read, never instead of it.
pub(crate) async fn load_and_cache(
    state: &AppState,
    project: Project,
) -> Result<ProjectDetail, sqlx::Error> {
    let detail = load_detail(&state.pool, project).await?;
    state.cache.upsert(snapshot_of(&detail));
    Ok(detail)
}

/// Project snapshot as served on the cache fallback path.
pub(crate) fn snapshot_of(detail: &ProjectDetail) -> ProjectSnapshot {
    ProjectSnapshot {
        id: detail.project.id,
        preview_code: detail.project.preview_code.clone(),
        client_name: detail.project.client_name.clone(),
        client_email: detail.project.client_email.clone(),
        package_type: detail.project.package_type.clone(),
        status: detail.project.status,
        versions: detail
            .versions
            .iter()
            .map(|v| VersionSnapshot {
                id: v.id,
                name: v.name.clone(),
                description: v.description.clone(),
                audio_url: v.audio_url.clone(),
                recommended: v.recommended,
                is_final: v.is_final,
                created_at: v.created_at,
            })
            .collect(),
        feedback: detail
            .feedback
            .iter()
            .map(|f| FeedbackSnapshot {
                content: f.content.clone(),
                created_at: f.created_at,
            })
            .collect(),
        expires_at: detail.project.expires_at,
        created_at: detail.project.created_at,
        cached_at: Utc::now(),
    }
}

/// Find a project or produce the standard 404.
pub(crate) async fn find_project(pool: &PgPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

// ---------------------------------------------------------------------------
// CRUD handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, query.q.as_deref()).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AdminCreateProject>,
) -> AppResult<impl IntoResponse> {
    if input.client_name.trim().is_empty() || input.client_email.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "client_name and client_email are required".into(),
        )));
    }

    let create = CreateProject {
        preview_code: Some(input.preview_code.unwrap_or_else(generate_preview_code)),
        client_name: input.client_name,
        client_email: input.client_email,
        package_type: input.package_type,
        briefing_id: None,
        order_id: None,
        expires_at: input.expires_at,
    };
    let project = ProjectRepo::create(&state.pool, &create).await?;
    load_and_cache(&state, project.clone()).await?;

    tracing::info!(
        project_id = project.id,
        preview_code = ?project.preview_code,
        user_id = admin.user_id,
        "Project created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProjectWithShare::new(project),
        }),
    ))
}

/// GET /api/v1/projects/{id}
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = find_project(&state.pool, id).await?;
    let detail = load_and_cache(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let detail = load_and_cache(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/projects/{id}
///
/// Versions and feedback cascade; invoices survive with a NULLed reference.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = ProjectRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    state.cache.invalidate(id);
    tracing::info!(project_id = id, user_id = admin.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Version handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/versions
///
/// Attach a new version. Outstanding feedback is considered answered, so the
/// project returns to `waiting`; an approved project stays approved.
pub async fn create_version(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateVersion>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() || input.audio_url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name and audio_url are required".into(),
        )));
    }

    let project = find_project(&state.pool, id).await?;
    let next = status_after_version_attached(project.status);
    // Insert and status write commit together; a half-attached version can
    // never leave the project stuck in `feedback`.
    let (project, version) = ProjectRepo::attach_version(&state.pool, id, &input, next).await?;
    let detail = load_and_cache(&state, project).await?;

    state
        .notifier
        .notify(
            NotificationPurpose::PreviewReady,
            serde_json::json!({
                "event": "preview_ready",
                "project_id": id,
                "version_id": version.id,
                "version_name": version.name,
                "preview_code": detail.project.preview_code,
                "share_token": encode_share_token(id),
            }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// DELETE /api/v1/projects/{id}/versions/{vid}
///
/// The recommended/final pointers are cleared by the foreign key if they
/// pointed at the removed version.
pub async fn delete_version(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, vid)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_version_of_project(&state.pool, id, vid).await?;
    VersionRepo::delete(&state.pool, vid).await?;

    let project = find_project(&state.pool, id).await?;
    load_and_cache(&state, project).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/projects/{id}/versions/{vid}/recommend
///
/// Point the single recommended slot at this version; any previous
/// recommendation is replaced.
pub async fn recommend_version(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, vid)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    require_version_of_project(&state.pool, id, vid).await?;
    let project = ProjectRepo::set_recommended_version(&state.pool, id, Some(vid))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let detail = load_and_cache(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/projects/{id}/versions/{vid}/final
pub async fn set_final_version(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, vid)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    require_version_of_project(&state.pool, id, vid).await?;
    let project = ProjectRepo::set_final_version(&state.pool, id, Some(vid))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let detail = load_and_cache(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// 404 unless `vid` exists and belongs to project `id`.
async fn require_version_of_project(pool: &PgPool, id: DbId, vid: DbId) -> AppResult<()> {
    let version = VersionRepo::find_by_id(pool, vid)
        .await?
        .filter(|v| v.project_id == id);
    if version.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Version",
            id: vid,
        }));
    }
    Ok(())
}
