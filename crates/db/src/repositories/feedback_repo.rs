//! Repository for the `feedback` table.

use sqlx::PgPool;

use harmonia_core::types::DbId;

use crate::models::feedback::FeedbackEntry;

const COLUMNS: &str = "id, project_id, content, created_at";

/// Provides append/list operations for feedback history.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Append a feedback entry to a project's history.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        content: &str,
    ) -> Result<FeedbackEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (project_id, content) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FeedbackEntry>(&query)
            .bind(project_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List a project's feedback history, oldest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<FeedbackEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, FeedbackEntry>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
