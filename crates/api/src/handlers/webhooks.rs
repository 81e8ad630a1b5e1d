//! Admin handlers for outbound webhook configuration and delivery history.

use axum::extract::{Path, Query, State};
use axum::Json;
use harmonia_core::error::CoreError;
use harmonia_core::notify::NotificationPurpose;
use harmonia_db::models::webhook::{ConfigureEndpoint, WebhookDelivery, WebhookEndpoint};
use harmonia_db::repositories::WebhookRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Pagination for the delivery history listing.
#[derive(Debug, Deserialize)]
pub struct DeliveryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

const DEFAULT_DELIVERY_LIMIT: i64 = 50;
const MAX_DELIVERY_LIMIT: i64 = 200;

/// GET /api/v1/webhooks
pub async fn list_endpoints(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WebhookEndpoint>>>> {
    let endpoints = WebhookRepo::list_endpoints(&state.pool).await?;
    Ok(Json(DataResponse { data: endpoints }))
}

/// GET /api/v1/webhooks/{purpose}
pub async fn get_endpoint(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(purpose): Path<String>,
) -> AppResult<Json<DataResponse<WebhookEndpoint>>> {
    let purpose = parse_purpose(&purpose)?;
    let endpoint = WebhookRepo::find_endpoint(&state.pool, purpose)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No webhook endpoint configured for {purpose}"))
        })?;
    Ok(Json(DataResponse { data: endpoint }))
}

/// PUT /api/v1/webhooks/{purpose}
///
/// Create or replace the single endpoint for a purpose.
pub async fn configure_endpoint(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(purpose): Path<String>,
    Json(input): Json<ConfigureEndpoint>,
) -> AppResult<Json<DataResponse<WebhookEndpoint>>> {
    let purpose = parse_purpose(&purpose)?;
    let url = input.url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::Core(CoreError::Validation(
            "url must be an absolute http(s) URL".into(),
        )));
    }

    let endpoint =
        WebhookRepo::upsert_endpoint(&state.pool, purpose, url, input.is_enabled.unwrap_or(true))
            .await?;

    tracing::info!(
        purpose = %purpose,
        url = %endpoint.url,
        is_enabled = endpoint.is_enabled,
        user_id = admin.user_id,
        "Webhook endpoint configured"
    );
    Ok(Json(DataResponse { data: endpoint }))
}

/// GET /api/v1/webhooks/{purpose}/deliveries
pub async fn list_deliveries(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(purpose): Path<String>,
    Query(query): Query<DeliveryQuery>,
) -> AppResult<Json<DataResponse<Vec<WebhookDelivery>>>> {
    let purpose = parse_purpose(&purpose)?;
    let endpoint = WebhookRepo::find_endpoint(&state.pool, purpose)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No webhook endpoint configured for {purpose}"))
        })?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_DELIVERY_LIMIT)
        .clamp(1, MAX_DELIVERY_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let deliveries =
        WebhookRepo::list_deliveries_for_endpoint(&state.pool, endpoint.id, limit, offset).await?;
    Ok(Json(DataResponse { data: deliveries }))
}

fn parse_purpose(raw: &str) -> AppResult<NotificationPurpose> {
    NotificationPurpose::parse(raw).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown notification purpose: {raw}"
        )))
    })
}
