//! Invoice handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::PageRequest;
use mundosolar_entity::invoice::model::CreateInvoice;

use crate::dto::request::{IssueInvoiceRequest, ListQuery, StampInvoiceRequest};
use crate::error::HandlerResult;
use crate::extractors::AuthStaff;
use crate::state::AppState;

/// GET /api/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(query): Query<ListQuery>,
) -> HandlerResult<Json<serde_json::Value>> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(25));
    let result = state
        .invoice_service
        .list(&auth, &page, query.client_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/invoices/:id
pub async fn get_invoice(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let invoice = state.invoice_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": invoice })))
}

/// POST /api/invoices
pub async fn issue_invoice(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<IssueInvoiceRequest>,
) -> HandlerResult<Json<serde_json::Value>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let invoice = state
        .invoice_service
        .issue(
            &auth,
            CreateInvoice {
                order_id: req.order_id,
                cfdi_use: req.cfdi_use,
                payment_form: req.payment_form,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": invoice })))
}

/// POST /api/invoices/:id/stamp
pub async fn stamp_invoice(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<StampInvoiceRequest>,
) -> HandlerResult<Json<serde_json::Value>> {
    let invoice = state
        .invoice_service
        .mark_stamped(&auth, id, req.fiscal_uuid)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": invoice })))
}

/// POST /api/invoices/:id/cancel
pub async fn cancel_invoice(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let invoice = state.invoice_service.cancel(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": invoice })))
}
