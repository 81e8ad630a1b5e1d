//! Repository for the `projects` table.

use sqlx::PgPool;

use harmonia_core::status::ProjectStatus;
use harmonia_core::types::DbId;

use crate::models::feedback::FeedbackEntry;
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::version::{CreateVersion, Version};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, preview_code, client_name, client_email, package_type, status, \
    recommended_version_id, final_version_id, briefing_id, order_id, \
    expires_at, created_at";

/// Provides CRUD and lifecycle operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Both creation paths (briefing conversion, payment confirmation) go
    /// through here; provenance is recorded via `briefing_id`/`order_id`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects \
                 (preview_code, client_name, client_email, package_type, \
                  briefing_id, order_id, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.preview_code)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.package_type)
            .bind(input.briefing_id)
            .bind(input.order_id)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its shareable preview code (exact match).
    pub async fn find_by_preview_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE preview_code = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List projects, newest first, optionally filtered by a case-insensitive
    /// substring match on client name or email.
    pub async fn list(pool: &PgPool, filter: Option<&str>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE ($1::TEXT IS NULL \
                    OR client_name ILIKE '%' || $1 || '%' \
                    OR client_email ILIKE '%' || $1 || '%') \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter)
            .fetch_all(pool)
            .await
    }

    /// Update a project's descriptive fields. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                 preview_code = COALESCE($2, preview_code), \
                 client_name = COALESCE($3, client_name), \
                 client_email = COALESCE($4, client_email), \
                 package_type = COALESCE($5, package_type), \
                 expires_at = COALESCE($6, expires_at) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.preview_code)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.package_type)
            .bind(input.expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Set a project's lifecycle status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Set the status and append one feedback entry, atomically.
    ///
    /// The handler reports success only after this commits; the snapshot
    /// cache is refreshed afterwards, never instead.
    pub async fn set_status_with_feedback(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
        content: &str,
    ) -> Result<(Project, FeedbackEntry), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;

        let entry = sqlx::query_as::<_, FeedbackEntry>(
            "INSERT INTO feedback (project_id, content) VALUES ($1, $2) \
             RETURNING id, project_id, content, created_at",
        )
        .bind(id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((project, entry))
    }

    /// Attach a version and set the project's status, atomically.
    ///
    /// A new version answers outstanding feedback, so the status write
    /// belongs in the same transaction as the insert.
    pub async fn attach_version(
        pool: &PgPool,
        id: DbId,
        input: &CreateVersion,
        status: ProjectStatus,
    ) -> Result<(Project, Version), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let version = sqlx::query_as::<_, Version>(
            "INSERT INTO versions (project_id, name, description, audio_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, project_id, name, description, audio_url, created_at",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.audio_url)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE projects SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((project, version))
    }

    /// Point the project's single recommended version at `version_id`
    /// (or clear it with `None`). Re-pointing replaces the previous choice.
    pub async fn set_recommended_version(
        pool: &PgPool,
        id: DbId,
        version_id: Option<DbId>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET recommended_version_id = $2 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(version_id)
            .fetch_optional(pool)
            .await
    }

    /// Point the project's single final version at `version_id`.
    pub async fn set_final_version(
        pool: &PgPool,
        id: DbId,
        version_id: Option<DbId>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET final_version_id = $2 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(version_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Versions and feedback cascade; invoices keep
    /// a NULLed reference. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
