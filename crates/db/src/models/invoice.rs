//! Invoice entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harmonia_core::types::{DbId, Timestamp};

/// An invoice row from the `invoices` table.
///
/// `client_id`/`project_id` are nullable on purpose: deleting a client or a
/// project leaves its invoices in place (no cascade).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub number: String,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub amount_cents: i64,
    pub status: String,
    pub issued_at: Timestamp,
    pub due_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub number: String,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub amount_cents: i64,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
    pub due_at: Option<Timestamp>,
}

/// DTO for updating an existing invoice. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoice {
    pub number: Option<String>,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub amount_cents: Option<i64>,
    pub status: Option<String>,
    pub due_at: Option<Timestamp>,
}
