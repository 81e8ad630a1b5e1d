//! Admin handlers for the `/invoices` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use harmonia_core::error::CoreError;
use harmonia_core::types::DbId;
use harmonia_db::models::invoice::{CreateInvoice, Invoice, UpdateInvoice};
use harmonia_db::repositories::InvoiceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::ListQuery;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/invoices (`?q=` filters on the invoice number)
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<Invoice>>>> {
    let invoices = InvoiceRepo::list(&state.pool, query.q.as_deref()).await?;
    Ok(Json(DataResponse { data: invoices }))
}

/// POST /api/v1/invoices
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateInvoice>,
) -> AppResult<impl IntoResponse> {
    if input.number.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "number is required".into(),
        )));
    }
    if input.amount_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "amount_cents must not be negative".into(),
        )));
    }
    let invoice = InvoiceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: invoice })))
}

/// GET /api/v1/invoices/{id}
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    let invoice = InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    Ok(Json(DataResponse { data: invoice }))
}

/// PUT /api/v1/invoices/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoice>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    let invoice = InvoiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    Ok(Json(DataResponse { data: invoice }))
}

/// DELETE /api/v1/invoices/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = InvoiceRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
