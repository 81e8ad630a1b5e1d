//! Repository for the `orders` table.

use sqlx::PgPool;

use harmonia_core::types::DbId;

use crate::models::order::{Order, ORDER_STATUS_PAID};

const COLUMNS: &str = "\
    id, client_name, client_email, package_type, amount_cents, status, \
    checkout_url, created_at, paid_at";

/// Provides operations for checkout orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Record a new pending order pointing at the hosted checkout.
    pub async fn create(
        pool: &PgPool,
        client_name: &str,
        client_email: &str,
        package_type: &str,
        amount_cents: i64,
        checkout_url: &str,
    ) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders \
                 (client_name, client_email, package_type, amount_cents, checkout_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(client_name)
            .bind(client_email)
            .bind(package_type)
            .bind(amount_cents)
            .bind(checkout_url)
            .fetch_one(pool)
            .await
    }

    /// Find an order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List orders, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC");
        sqlx::query_as::<_, Order>(&query).fetch_all(pool).await
    }

    /// Mark a pending order as paid. Returns `None` if the order does not
    /// exist or was already paid (the confirm hook is one-shot).
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $2, paid_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(ORDER_STATUS_PAID)
            .fetch_optional(pool)
            .await
    }
}
