//! Repository for the `invoices` table.

use sqlx::PgPool;

use harmonia_core::types::DbId;

use crate::models::invoice::{CreateInvoice, Invoice, UpdateInvoice};

const COLUMNS: &str = "\
    id, number, client_id, project_id, amount_cents, status, issued_at, \
    due_at, created_at, updated_at";

/// Provides CRUD operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new invoice. Status defaults to `draft` if omitted.
    pub async fn create(pool: &PgPool, input: &CreateInvoice) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices \
                 (number, client_id, project_id, amount_cents, status, due_at) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'), $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(&input.number)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.amount_cents)
            .bind(&input.status)
            .bind(input.due_at)
            .fetch_one(pool)
            .await
    }

    /// Find an invoice by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List invoices, newest first, optionally filtered by a
    /// case-insensitive substring match on the invoice number.
    pub async fn list(pool: &PgPool, filter: Option<&str>) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices \
             WHERE ($1::TEXT IS NULL OR number ILIKE '%' || $1 || '%') \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(filter)
            .fetch_all(pool)
            .await
    }

    /// Update an invoice. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvoice,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET \
                 number = COALESCE($2, number), \
                 client_id = COALESCE($3, client_id), \
                 project_id = COALESCE($4, project_id), \
                 amount_cents = COALESCE($5, amount_cents), \
                 status = COALESCE($6, status), \
                 due_at = COALESCE($7, due_at), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(&input.number)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.amount_cents)
            .bind(&input.status)
            .bind(input.due_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete an invoice by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
