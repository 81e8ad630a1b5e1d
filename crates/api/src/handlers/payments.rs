//! Handlers for the hosted-checkout payment flow.
//!
//! Checkout records a `pending` order and hands the client the hosted
//! checkout URL. The confirm hook is the thank-you redirect target: it marks
//! the order paid (one-shot) and creates the project through the shared
//! creation routine, replacing the original flow's unconfirmed optimism.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use harmonia_core::error::CoreError;
use harmonia_core::notify::NotificationPurpose;
use harmonia_core::preview::encode_share_token;
use harmonia_core::types::DbId;
use harmonia_db::models::order::{Order, StartCheckout};
use harmonia_db::models::project::CreateProject;
use harmonia_db::repositories::{OrderRepo, ProjectRepo};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{generate_preview_code, load_and_cache, ProjectWithShare};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /payments/{order_id}/confirm`.
#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub order: Order,
    pub project: ProjectWithShare,
}

/// POST /api/v1/payments/checkout (public)
///
/// Record a pending order and return the hosted checkout URL.
pub async fn start_checkout(
    State(state): State<AppState>,
    Json(input): Json<StartCheckout>,
) -> AppResult<impl IntoResponse> {
    if input.client_name.trim().is_empty() || input.client_email.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "client_name and client_email are required".into(),
        )));
    }
    if input.amount_cents <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "amount_cents must be positive".into(),
        )));
    }

    // Opaque reference embedded in the hosted checkout URL.
    let reference = Uuid::new_v4().simple().to_string();
    let checkout_url = format!("{}/{}", state.config.checkout_base_url, reference);

    let order = OrderRepo::create(
        &state.pool,
        &input.client_name,
        &input.client_email,
        &input.package_type,
        input.amount_cents,
        &checkout_url,
    )
    .await?;

    tracing::info!(order_id = order.id, amount_cents = order.amount_cents, "Checkout started");
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// POST /api/v1/payments/{order_id}/confirm (public)
///
/// Mark the order paid and create its project. One-shot: confirming an
/// already paid (or unknown) order is rejected, so a replayed redirect cannot
/// create a second project.
pub async fn confirm(
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = match OrderRepo::mark_paid(&state.pool, order_id).await? {
        Some(order) => order,
        None => {
            // Distinguish a replay from a bad id for the error message only.
            return match OrderRepo::find_by_id(&state.pool, order_id).await? {
                Some(_) => Err(AppError::Core(CoreError::Conflict(
                    "Order was already confirmed".into(),
                ))),
                None => Err(AppError::Core(CoreError::NotFound {
                    entity: "Order",
                    id: order_id,
                })),
            };
        }
    };

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            preview_code: Some(generate_preview_code()),
            client_name: order.client_name.clone(),
            client_email: order.client_email.clone(),
            package_type: order.package_type.clone(),
            briefing_id: None,
            order_id: Some(order.id),
            expires_at: None,
        },
    )
    .await?;
    load_and_cache(&state, project.clone()).await?;

    state
        .notifier
        .notify(
            NotificationPurpose::Payment,
            serde_json::json!({
                "event": "payment_confirmed",
                "order_id": order.id,
                "project_id": project.id,
                "amount_cents": order.amount_cents,
                "preview_code": project.preview_code,
                "share_token": encode_share_token(project.id),
            }),
        )
        .await;

    tracing::info!(order_id = order.id, project_id = project.id, "Payment confirmed");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ConfirmResponse {
                order,
                project: ProjectWithShare::new(project),
            },
        }),
    ))
}

/// GET /api/v1/orders (admin)
pub async fn list_orders(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Order>>>> {
    let orders = OrderRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: orders }))
}
