//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harmonia_core::status::ProjectStatus;
use harmonia_core::types::{DbId, Timestamp};

use crate::models::feedback::FeedbackEntry;
use crate::models::version::VersionOut;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    /// Human-shareable token (e.g. `HAR-2025-001`); absent projects are only
    /// addressable by id, which requires admin access.
    pub preview_code: Option<String>,
    pub client_name: String,
    pub client_email: String,
    pub package_type: String,
    pub status: ProjectStatus,
    /// Single recommended version, if any. A pointer rather than a
    /// per-version flag so two versions can never both be recommended.
    pub recommended_version_id: Option<DbId>,
    pub final_version_id: Option<DbId>,
    pub briefing_id: Option<DbId>,
    pub order_id: Option<DbId>,
    /// Informational only; nothing filters or rejects on expiry.
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new project.
///
/// Both creation paths (briefing conversion and payment confirmation) build
/// this DTO and go through the same repository routine.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub preview_code: Option<String>,
    pub client_name: String,
    pub client_email: String,
    pub package_type: String,
    pub briefing_id: Option<DbId>,
    pub order_id: Option<DbId>,
    pub expires_at: Option<Timestamp>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub preview_code: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub package_type: Option<String>,
    pub expires_at: Option<Timestamp>,
}

/// A project joined with its ordered versions and feedback history, as
/// served to the preview page and the admin detail view.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub versions: Vec<VersionOut>,
    pub feedback: Vec<FeedbackEntry>,
}
