//! Feedback history model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harmonia_core::types::{DbId, Timestamp};

/// A feedback row from the `feedback` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedbackEntry {
    pub id: DbId,
    pub project_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// Request body for submitting feedback on a preview.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitFeedback {
    pub content: String,
}
