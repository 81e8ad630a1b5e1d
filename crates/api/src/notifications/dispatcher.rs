//! Background delivery loop for queued webhook notifications.

use std::time::Duration;

use harmonia_db::models::webhook::WebhookDelivery;
use harmonia_db::repositories::WebhookRepo;
use harmonia_db::DbPool;
use tokio_util::sync::CancellationToken;

/// How many due deliveries to pick up per tick.
const DELIVERY_BATCH_SIZE: i64 = 50;

/// Base delay for the first retry; doubles per attempt.
const RETRY_BASE_SECS: i64 = 60;

/// Retry delays never exceed this (1 hour).
const RETRY_MAX_SECS: i64 = 3600;

/// Per-request timeout for outbound POSTs.
const DELIVERY_TIMEOUT_SECS: u64 = 10;

/// Polls the `webhook_deliveries` queue and POSTs payloads to their
/// configured endpoints.
///
/// Runs until the cancellation token fires. A 2xx response marks the delivery
/// delivered; anything else (non-2xx or a transport error) schedules a retry
/// with exponential backoff until `max_attempts` is exhausted.
pub struct Dispatcher {
    pool: DbPool,
    client: reqwest::Client,
    interval: Duration,
}

impl Dispatcher {
    pub fn new(pool: DbPool, interval_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DELIVERY_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            pool,
            client,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Run the dispatch loop until cancelled.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Webhook dispatcher started");
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.process_due().await,
                () = cancel.cancelled() => {
                    tracing::info!("Webhook dispatcher stopping");
                    return;
                }
            }
        }
    }

    /// Pick up one batch of due deliveries and attempt each in turn.
    async fn process_due(&self) {
        let due = match WebhookRepo::list_due_deliveries(&self.pool, DELIVERY_BATCH_SIZE).await {
            Ok(due) => due,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list due webhook deliveries");
                return;
            }
        };

        for delivery in due {
            if let Err(e) = self.attempt(&delivery).await {
                tracing::error!(
                    delivery_id = delivery.id,
                    error = %e,
                    "Failed to record webhook delivery attempt"
                );
            }
        }
    }

    /// POST one delivery and record the outcome.
    async fn attempt(&self, delivery: &WebhookDelivery) -> Result<(), sqlx::Error> {
        let endpoint =
            match WebhookRepo::find_endpoint_by_id(&self.pool, delivery.endpoint_id).await? {
                Some(endpoint) => endpoint,
                None => {
                    // Endpoint was deleted out from under the queue.
                    WebhookRepo::schedule_retry(
                        &self.pool,
                        delivery.id,
                        None,
                        delivery.max_attempts,
                        0,
                    )
                    .await?;
                    return Ok(());
                }
            };

        let attempt = delivery.attempt_count + 1;
        let result = self
            .client
            .post(&endpoint.url)
            .json(&delivery.payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let code = response.status().as_u16() as i16;
                WebhookRepo::mark_delivered(&self.pool, delivery.id, code).await?;
                tracing::info!(
                    delivery_id = delivery.id,
                    endpoint_id = endpoint.id,
                    status = code,
                    "Webhook delivered"
                );
            }
            Ok(response) => {
                let code = response.status().as_u16() as i16;
                let delay = backoff_secs(attempt);
                WebhookRepo::schedule_retry(&self.pool, delivery.id, Some(code), attempt, delay)
                    .await?;
                tracing::warn!(
                    delivery_id = delivery.id,
                    endpoint_id = endpoint.id,
                    status = code,
                    attempt,
                    retry_in_secs = delay,
                    "Webhook delivery rejected, retry scheduled"
                );
            }
            Err(e) => {
                let delay = backoff_secs(attempt);
                WebhookRepo::schedule_retry(&self.pool, delivery.id, None, attempt, delay).await?;
                tracing::warn!(
                    delivery_id = delivery.id,
                    endpoint_id = endpoint.id,
                    error = %e,
                    attempt,
                    retry_in_secs = delay,
                    "Webhook delivery failed, retry scheduled"
                );
            }
        }
        Ok(())
    }
}

/// Exponential backoff: 60s, 120s, 240s, ... capped at one hour.
fn backoff_secs(attempt: i16) -> i64 {
    let shift = (attempt.max(1) - 1).min(16) as u32;
    (RETRY_BASE_SECS << shift).min(RETRY_MAX_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_per_attempt() {
        assert_eq!(backoff_secs(1), 60);
        assert_eq!(backoff_secs(2), 120);
        assert_eq!(backoff_secs(3), 240);
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff_secs(10), RETRY_MAX_SECS);
        assert_eq!(backoff_secs(100), RETRY_MAX_SECS);
    }
}
