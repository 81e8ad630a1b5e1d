//! Handlers for the public `/preview/{token}` surface: the resolver plus the
//! client feedback and approval actions.
//!
//! The resolver serves from the authoritative store and falls back to the
//! snapshot cache only when the store errors. The client actions are writes
//! and never fall back: success is reported only after the store committed.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use harmonia_core::error::CoreError;
use harmonia_core::notify::NotificationPurpose;
use harmonia_core::preview::{classify_token, TokenKind};
use harmonia_core::status::{next_status, ClientAction, PersistOutcome, Transition};
use harmonia_core::types::DbId;
use harmonia_db::models::feedback::SubmitFeedback;
use harmonia_db::models::project::{Project, ProjectDetail};
use harmonia_db::repositories::ProjectRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{load_and_cache, load_detail};
use crate::middleware::auth::MaybeAdmin;
use crate::state::AppState;

/// Preview payload with its provenance: `store` for an authoritative read,
/// `cache` for a snapshot served while the store is unavailable.
#[derive(Debug, Serialize)]
pub struct PreviewResponse<T: Serialize> {
    pub data: T,
    pub source: &'static str,
}

/// Result of a client action, carrying the explicit write outcome.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub data: ProjectDetail,
    pub outcome: PersistOutcome,
}

/// GET /api/v1/preview/{token}
///
/// Resolve a preview link. Accepts a stored preview code or an encoded share
/// token; bare numeric ids resolve only for admins and look like a 404 to
/// everyone else.
pub async fn get_preview(
    MaybeAdmin(admin): MaybeAdmin,
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<impl IntoResponse> {
    let is_admin = admin.is_some();
    let kind = classify_token(&token);

    // Cache lookups match by code or by id; only ids the caller is allowed
    // to use become hints.
    let id_hint: Option<DbId> = match kind {
        TokenKind::ShareToken(id) => Some(id),
        TokenKind::RawId(id) if is_admin => Some(id),
        _ => None,
    };

    match read_from_store(&state, &token, kind, is_admin).await {
        Ok(Some(detail)) => Ok(Json(PreviewResponse {
            data: detail,
            source: "store",
        })
        .into_response()),
        Ok(None) => Err(AppError::NotFound(
            "No project matches this preview link".into(),
        )),
        Err(e) => {
            tracing::warn!(token = %token, error = %e, "Store unavailable, trying snapshot cache");
            match state.cache.find(&token, id_hint) {
                Some(snapshot) => Ok(Json(PreviewResponse {
                    data: snapshot,
                    source: "cache",
                })
                .into_response()),
                None => Err(AppError::NotFound(
                    "No project matches this preview link".into(),
                )),
            }
        }
    }
}

/// POST /api/v1/preview/{token}/feedback
///
/// Submit client feedback. Moves the project to `feedback` and appends one
/// history entry in a single transaction; rejected with 409 once approved.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(input): Json<SubmitFeedback>,
) -> AppResult<Json<TransitionResponse>> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Feedback content must not be empty".into(),
        )));
    }

    let project = find_project_for_client(&state, &token).await?;

    match next_status(project.status, ClientAction::SubmitFeedback) {
        Transition::Move(status) => {
            let (updated, _entry) =
                ProjectRepo::set_status_with_feedback(&state.pool, project.id, status, content)
                    .await?;
            let detail = load_and_cache(&state, updated).await?;

            state
                .notifier
                .notify(
                    NotificationPurpose::Feedback,
                    serde_json::json!({
                        "event": "feedback_submitted",
                        "project_id": detail.project.id,
                        "preview_code": detail.project.preview_code,
                        "status": detail.project.status,
                        "content": content,
                    }),
                )
                .await;

            Ok(Json(TransitionResponse {
                data: detail,
                outcome: PersistOutcome::Persisted,
            }))
        }
        Transition::Noop => {
            let detail = load_detail(&state.pool, project).await?;
            Ok(Json(TransitionResponse {
                data: detail,
                outcome: PersistOutcome::Persisted,
            }))
        }
        Transition::Rejected(reason) => Err(AppError::Core(CoreError::Conflict(reason.into()))),
    }
}

/// POST /api/v1/preview/{token}/approve
///
/// Approve the project. Idempotent: approving an already approved project
/// returns the current state without a new history entry or notification.
pub async fn approve(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<TransitionResponse>> {
    let project = find_project_for_client(&state, &token).await?;

    match next_status(project.status, ClientAction::Approve) {
        Transition::Move(status) => {
            let updated = ProjectRepo::set_status(&state.pool, project.id, status)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Project",
                    id: project.id,
                }))?;
            let detail = load_and_cache(&state, updated).await?;

            state
                .notifier
                .notify(
                    NotificationPurpose::Feedback,
                    serde_json::json!({
                        "event": "project_approved",
                        "project_id": detail.project.id,
                        "preview_code": detail.project.preview_code,
                        "status": detail.project.status,
                    }),
                )
                .await;

            Ok(Json(TransitionResponse {
                data: detail,
                outcome: PersistOutcome::Persisted,
            }))
        }
        Transition::Noop => {
            let detail = load_detail(&state.pool, project).await?;
            Ok(Json(TransitionResponse {
                data: detail,
                outcome: PersistOutcome::Persisted,
            }))
        }
        Transition::Rejected(reason) => Err(AppError::Core(CoreError::Conflict(reason.into()))),
    }
}

/// Authoritative read for the resolver: preview code first (exact, original
/// token), then the id carried by a share token or an admin raw id.
async fn read_from_store(
    state: &AppState,
    token: &str,
    kind: TokenKind,
    is_admin: bool,
) -> Result<Option<ProjectDetail>, sqlx::Error> {
    let project = match ProjectRepo::find_by_preview_code(&state.pool, token).await? {
        Some(project) => Some(project),
        None => match kind {
            TokenKind::ShareToken(id) => ProjectRepo::find_by_id(&state.pool, id).await?,
            TokenKind::RawId(id) if is_admin => ProjectRepo::find_by_id(&state.pool, id).await?,
            _ => None,
        },
    };

    match project {
        Some(project) => Ok(Some(load_and_cache(state, project).await?)),
        None => Ok(None),
    }
}

/// Client addressing for writes: preview code or share token only. Raw ids
/// are never accepted on the action endpoints, admin or not.
async fn find_project_for_client(state: &AppState, token: &str) -> AppResult<Project> {
    if let Some(project) = ProjectRepo::find_by_preview_code(&state.pool, token).await? {
        return Ok(project);
    }
    if let TokenKind::ShareToken(id) = classify_token(token) {
        if let Some(project) = ProjectRepo::find_by_id(&state.pool, id).await? {
            return Ok(project);
        }
    }
    Err(AppError::NotFound(
        "No project matches this preview link".into(),
    ))
}
