//! Briefing entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harmonia_core::types::{DbId, Timestamp};

pub const BRIEFING_STATUS_NEW: &str = "new";
pub const BRIEFING_STATUS_CONVERTED: &str = "converted";

/// A briefing row from the `briefings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Briefing {
    pub id: DbId,
    pub client_name: String,
    pub client_email: String,
    pub package_type: String,
    pub message: String,
    pub reference_links: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for submitting a new briefing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBriefing {
    pub client_name: String,
    pub client_email: String,
    pub package_type: String,
    pub message: String,
    pub reference_links: Option<String>,
}

/// DTO for updating an existing briefing. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBriefing {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub package_type: Option<String>,
    pub message: Option<String>,
    pub reference_links: Option<String>,
}
