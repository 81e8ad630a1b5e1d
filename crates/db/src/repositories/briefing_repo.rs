//! Repository for the `briefings` table.

use sqlx::PgPool;

use harmonia_core::types::DbId;

use crate::models::briefing::{Briefing, CreateBriefing, UpdateBriefing, BRIEFING_STATUS_CONVERTED};

const COLUMNS: &str = "\
    id, client_name, client_email, package_type, message, reference_links, \
    status, created_at";

/// Provides CRUD operations for briefings.
pub struct BriefingRepo;

impl BriefingRepo {
    /// Insert a new briefing with status `new`.
    pub async fn create(pool: &PgPool, input: &CreateBriefing) -> Result<Briefing, sqlx::Error> {
        let query = format!(
            "INSERT INTO briefings \
                 (client_name, client_email, package_type, message, reference_links) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Briefing>(&query)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.package_type)
            .bind(&input.message)
            .bind(&input.reference_links)
            .fetch_one(pool)
            .await
    }

    /// Find a briefing by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Briefing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM briefings WHERE id = $1");
        sqlx::query_as::<_, Briefing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List briefings, newest first, optionally filtered by a
    /// case-insensitive substring match on client name or email.
    pub async fn list(pool: &PgPool, filter: Option<&str>) -> Result<Vec<Briefing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM briefings \
             WHERE ($1::TEXT IS NULL \
                    OR client_name ILIKE '%' || $1 || '%' \
                    OR client_email ILIKE '%' || $1 || '%') \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Briefing>(&query)
            .bind(filter)
            .fetch_all(pool)
            .await
    }

    /// Update a briefing. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBriefing,
    ) -> Result<Option<Briefing>, sqlx::Error> {
        let query = format!(
            "UPDATE briefings SET \
                 client_name = COALESCE($2, client_name), \
                 client_email = COALESCE($3, client_email), \
                 package_type = COALESCE($4, package_type), \
                 message = COALESCE($5, message), \
                 reference_links = COALESCE($6, reference_links) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Briefing>(&query)
            .bind(id)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.package_type)
            .bind(&input.message)
            .bind(&input.reference_links)
            .fetch_optional(pool)
            .await
    }

    /// Mark a briefing as converted into a project. Returns `None` if the
    /// briefing does not exist or was already converted (conversion is
    /// one-shot, so two racing converts cannot both claim the briefing).
    pub async fn mark_converted(pool: &PgPool, id: DbId) -> Result<Option<Briefing>, sqlx::Error> {
        let query = format!(
            "UPDATE briefings SET status = $2 \
             WHERE id = $1 AND status <> $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Briefing>(&query)
            .bind(id)
            .bind(BRIEFING_STATUS_CONVERTED)
            .fetch_optional(pool)
            .await
    }

    /// Delete a briefing by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM briefings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
