//! Repository for the `versions` table.

use sqlx::PgPool;

use harmonia_core::types::DbId;

use crate::models::version::{CreateVersion, Version};

const COLUMNS: &str = "id, project_id, name, description, audio_url, created_at";

/// Provides CRUD operations for version attachments.
pub struct VersionRepo;

impl VersionRepo {
    /// Attach a new version to a project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateVersion,
    ) -> Result<Version, sqlx::Error> {
        let query = format!(
            "INSERT INTO versions (project_id, name, description, audio_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.audio_url)
            .fetch_one(pool)
            .await
    }

    /// Find a version by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Version>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM versions WHERE id = $1");
        sqlx::query_as::<_, Version>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's versions in display order (insertion order).
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Version>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a version by ID. The project's recommended/final pointers are
    /// cleared by the foreign key's SET NULL. Returns `true` if removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM versions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
