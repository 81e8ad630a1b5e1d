//! Version attachment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harmonia_core::types::{DbId, Timestamp};

/// A version row from the `versions` table.
///
/// Recommended/final are not columns here; they are pointers on the owning
/// project and get derived into [`VersionOut`] when serializing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Version {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub audio_url: String,
    pub created_at: Timestamp,
}

/// DTO for attaching a new version to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersion {
    pub name: String,
    pub description: Option<String>,
    pub audio_url: String,
}

/// A version as served to clients, with derived role flags.
#[derive(Debug, Clone, Serialize)]
pub struct VersionOut {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub audio_url: String,
    pub recommended: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    pub created_at: Timestamp,
}

impl VersionOut {
    /// Derive the output shape from a row plus the project's pointers.
    pub fn derive(
        version: Version,
        recommended_version_id: Option<DbId>,
        final_version_id: Option<DbId>,
    ) -> Self {
        Self {
            recommended: recommended_version_id == Some(version.id),
            is_final: final_version_id == Some(version.id),
            id: version.id,
            name: version.name,
            description: version.description,
            audio_url: version.audio_url,
            created_at: version.created_at,
        }
    }
}
