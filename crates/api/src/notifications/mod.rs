//! Outbound webhook notifications.
//!
//! Handlers never POST to external endpoints inline. [`Notifier`] writes a
//! `webhook_deliveries` row for the purpose's enabled endpoint and reports
//! [`PersistOutcome::QueuedForRetry`]; the background [`Dispatcher`] owns the
//! actual HTTP delivery, retries, and the terminal delivered/failed state.

mod dispatcher;

pub use dispatcher::Dispatcher;

use harmonia_core::notify::NotificationPurpose;
use harmonia_core::status::PersistOutcome;
use harmonia_db::repositories::WebhookRepo;
use harmonia_db::DbPool;

/// Queues outbound notifications into the delivery table.
///
/// Cheap to clone; shares the database pool.
#[derive(Clone)]
pub struct Notifier {
    pool: DbPool,
}

impl Notifier {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Queue a notification payload for the purpose's enabled endpoint.
    ///
    /// Returns `QueuedForRetry` when a delivery row was written, `Persisted`
    /// when no enabled endpoint is configured (nothing is owed), and `Failed`
    /// when the queue write itself failed. Never fails the calling request:
    /// the triggering write has already committed by the time this runs.
    pub async fn notify(
        &self,
        purpose: NotificationPurpose,
        payload: serde_json::Value,
    ) -> PersistOutcome {
        let endpoint = match WebhookRepo::find_enabled_endpoint(&self.pool, purpose).await {
            Ok(Some(endpoint)) => endpoint,
            Ok(None) => {
                tracing::debug!(purpose = %purpose, "No enabled webhook endpoint, skipping notification");
                return PersistOutcome::Persisted;
            }
            Err(e) => {
                tracing::error!(purpose = %purpose, error = %e, "Failed to look up webhook endpoint");
                return PersistOutcome::Failed;
            }
        };

        match WebhookRepo::create_delivery(&self.pool, endpoint.id, &payload).await {
            Ok(delivery) => {
                tracing::debug!(
                    purpose = %purpose,
                    delivery_id = delivery.id,
                    endpoint_id = endpoint.id,
                    "Notification queued"
                );
                PersistOutcome::QueuedForRetry
            }
            Err(e) => {
                tracing::error!(purpose = %purpose, error = %e, "Failed to queue notification");
                PersistOutcome::Failed
            }
        }
    }
}
