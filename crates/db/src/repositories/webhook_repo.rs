//! Repository for the `webhook_endpoints` and `webhook_deliveries` tables.

use sqlx::PgPool;

use harmonia_core::notify::NotificationPurpose;
use harmonia_core::types::DbId;

use crate::models::webhook::{WebhookDelivery, WebhookEndpoint};

const ENDPOINT_COLUMNS: &str = "id, purpose, url, is_enabled, created_at, updated_at";

const DELIVERY_COLUMNS: &str = "\
    id, endpoint_id, payload, status, attempt_count, max_attempts, \
    response_status_code, next_retry_at, delivered_at, created_at";

/// Provides configuration and queueing for outbound webhooks.
pub struct WebhookRepo;

impl WebhookRepo {
    // -----------------------------------------------------------------------
    // Endpoint configuration
    // -----------------------------------------------------------------------

    /// Create or replace the endpoint for a purpose (one endpoint per purpose).
    pub async fn upsert_endpoint(
        pool: &PgPool,
        purpose: NotificationPurpose,
        url: &str,
        is_enabled: bool,
    ) -> Result<WebhookEndpoint, sqlx::Error> {
        let query = format!(
            "INSERT INTO webhook_endpoints (purpose, url, is_enabled) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_webhook_endpoints_purpose \
             DO UPDATE SET url = EXCLUDED.url, \
                           is_enabled = EXCLUDED.is_enabled, \
                           updated_at = NOW() \
             RETURNING {ENDPOINT_COLUMNS}"
        );
        sqlx::query_as::<_, WebhookEndpoint>(&query)
            .bind(purpose)
            .bind(url)
            .bind(is_enabled)
            .fetch_one(pool)
            .await
    }

    /// Find the enabled endpoint for a purpose, if configured.
    pub async fn find_enabled_endpoint(
        pool: &PgPool,
        purpose: NotificationPurpose,
    ) -> Result<Option<WebhookEndpoint>, sqlx::Error> {
        let query = format!(
            "SELECT {ENDPOINT_COLUMNS} FROM webhook_endpoints \
             WHERE purpose = $1 AND is_enabled"
        );
        sqlx::query_as::<_, WebhookEndpoint>(&query)
            .bind(purpose)
            .fetch_optional(pool)
            .await
    }

    /// Find the endpoint for a purpose regardless of enablement.
    pub async fn find_endpoint(
        pool: &PgPool,
        purpose: NotificationPurpose,
    ) -> Result<Option<WebhookEndpoint>, sqlx::Error> {
        let query = format!(
            "SELECT {ENDPOINT_COLUMNS} FROM webhook_endpoints WHERE purpose = $1"
        );
        sqlx::query_as::<_, WebhookEndpoint>(&query)
            .bind(purpose)
            .fetch_optional(pool)
            .await
    }

    /// Find an endpoint by ID (used by the delivery dispatcher).
    pub async fn find_endpoint_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WebhookEndpoint>, sqlx::Error> {
        let query = format!("SELECT {ENDPOINT_COLUMNS} FROM webhook_endpoints WHERE id = $1");
        sqlx::query_as::<_, WebhookEndpoint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all configured endpoints.
    pub async fn list_endpoints(pool: &PgPool) -> Result<Vec<WebhookEndpoint>, sqlx::Error> {
        let query = format!(
            "SELECT {ENDPOINT_COLUMNS} FROM webhook_endpoints ORDER BY purpose"
        );
        sqlx::query_as::<_, WebhookEndpoint>(&query)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Delivery queue
    // -----------------------------------------------------------------------

    /// Queue a delivery (status `pending`) for the given endpoint.
    pub async fn create_delivery(
        pool: &PgPool,
        endpoint_id: DbId,
        payload: &serde_json::Value,
    ) -> Result<WebhookDelivery, sqlx::Error> {
        let query = format!(
            "INSERT INTO webhook_deliveries (endpoint_id, payload) \
             VALUES ($1, $2) \
             RETURNING {DELIVERY_COLUMNS}"
        );
        sqlx::query_as::<_, WebhookDelivery>(&query)
            .bind(endpoint_id)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// List deliveries ready for processing: pending or retrying, past their
    /// retry time, and under the attempt cap.
    pub async fn list_due_deliveries(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<WebhookDelivery>, sqlx::Error> {
        let query = format!(
            "SELECT {DELIVERY_COLUMNS} FROM webhook_deliveries \
             WHERE (status = 'pending' OR status = 'retrying') \
               AND (next_retry_at IS NULL OR next_retry_at <= NOW()) \
               AND attempt_count < max_attempts \
             ORDER BY created_at ASC LIMIT $1"
        );
        sqlx::query_as::<_, WebhookDelivery>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mark a delivery as successfully delivered.
    pub async fn mark_delivered(
        pool: &PgPool,
        delivery_id: DbId,
        response_status_code: i16,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE webhook_deliveries SET \
                 status = 'delivered', \
                 response_status_code = $2, \
                 delivered_at = NOW() \
             WHERE id = $1",
        )
        .bind(delivery_id)
        .bind(response_status_code)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a failed attempt and schedule the next retry, or mark the
    /// delivery failed once the attempt cap is reached.
    pub async fn schedule_retry(
        pool: &PgPool,
        delivery_id: DbId,
        response_status_code: Option<i16>,
        attempt_count: i16,
        delay_secs: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE webhook_deliveries SET \
                 status = CASE WHEN $3 >= max_attempts THEN 'failed' ELSE 'retrying' END, \
                 attempt_count = $3, \
                 response_status_code = $2, \
                 next_retry_at = NOW() + ($4 || ' seconds')::INTERVAL \
             WHERE id = $1",
        )
        .bind(delivery_id)
        .bind(response_status_code)
        .bind(attempt_count)
        .bind(delay_secs.to_string())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List deliveries for one endpoint, newest first, with pagination.
    pub async fn list_deliveries_for_endpoint(
        pool: &PgPool,
        endpoint_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WebhookDelivery>, sqlx::Error> {
        let query = format!(
            "SELECT {DELIVERY_COLUMNS} FROM webhook_deliveries \
             WHERE endpoint_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, WebhookDelivery>(&query)
            .bind(endpoint_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
