//! Outbound webhook endpoint and delivery models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harmonia_core::notify::NotificationPurpose;
use harmonia_core::types::{DbId, Timestamp};

pub const DELIVERY_STATUS_PENDING: &str = "pending";
pub const DELIVERY_STATUS_RETRYING: &str = "retrying";
pub const DELIVERY_STATUS_DELIVERED: &str = "delivered";
pub const DELIVERY_STATUS_FAILED: &str = "failed";

/// A configured outbound webhook, one per purpose.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebhookEndpoint {
    pub id: DbId,
    pub purpose: NotificationPurpose,
    pub url: String,
    pub is_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for configuring a purpose's endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureEndpoint {
    pub url: String,
    /// Defaults to enabled if omitted.
    pub is_enabled: Option<bool>,
}

/// A queued (or settled) delivery of one payload to one endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebhookDelivery {
    pub id: DbId,
    pub endpoint_id: DbId,
    pub payload: serde_json::Value,
    pub status: String,
    pub attempt_count: i16,
    pub max_attempts: i16,
    pub response_status_code: Option<i16>,
    pub next_retry_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
