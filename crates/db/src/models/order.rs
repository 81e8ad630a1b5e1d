//! Order model and DTOs for the hosted-checkout flow.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use harmonia_core::types::{DbId, Timestamp};

pub const ORDER_STATUS_PENDING: &str = "pending";
pub const ORDER_STATUS_PAID: &str = "paid";

/// An order row from the `orders` table.
///
/// Created when a client is sent to the hosted checkout; `pending` until the
/// confirmation hook fires. There is no processor-side reconciliation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub client_name: String,
    pub client_email: String,
    pub package_type: String,
    pub amount_cents: i64,
    pub status: String,
    pub checkout_url: String,
    pub created_at: Timestamp,
    pub paid_at: Option<Timestamp>,
}

/// Request body for starting a checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct StartCheckout {
    pub client_name: String,
    pub client_email: String,
    pub package_type: String,
    pub amount_cents: i64,
}
