//! Order and payment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use mundosolar_core::types::pagination::PageRequest;
use mundosolar_entity::order::model::CreateOrder;
use mundosolar_entity::order::payment::NewPayment;

use crate::dto::request::{AddPaymentRequest, CreateOrderRequest, ListQuery, UpdateOrderStatusRequest};
use crate::error::HandlerResult;
use crate::extractors::AuthStaff;
use crate::state::AppState;

/// GET /api/orders
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(query): Query<ListQuery>,
) -> HandlerResult<Json<serde_json::Value>> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(25));
    let result = state
        .order_service
        .list(&auth, &page, query.client_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let detail = state.order_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": detail })))
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<CreateOrderRequest>,
) -> HandlerResult<Json<serde_json::Value>> {
    let detail = state
        .order_service
        .create(
            &auth,
            CreateOrder {
                client_id: req.client_id,
                items: req.items,
                notes: req.notes,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": detail })))
}

/// PATCH /api/orders/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> HandlerResult<Json<serde_json::Value>> {
    let order = state
        .order_service
        .update_status(&auth, id, req.status)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": order })))
}

/// POST /api/orders/:id/payments
pub async fn add_payment(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<AddPaymentRequest>,
) -> HandlerResult<Json<serde_json::Value>> {
    let result = state
        .order_service
        .add_payment(
            &auth,
            id,
            NewPayment {
                amount: req.amount,
                method: req.method,
                reference: req.reference,
                notes: req.notes,
                paid_at: req.paid_at,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/orders/:id/payments
pub async fn list_payments(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let detail = state.order_service.get(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": detail.payments }),
    ))
}

/// DELETE /api/orders/:id/payments/:payment_id
pub async fn delete_payment(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path((id, payment_id)): Path<(Uuid, Uuid)>,
) -> HandlerResult<Json<serde_json::Value>> {
    let order = state
        .order_service
        .delete_payment(&auth, id, payment_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": order })))
}
