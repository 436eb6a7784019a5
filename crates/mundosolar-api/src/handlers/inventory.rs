//! Product catalog and inventory handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use mundosolar_core::types::pagination::PageRequest;
use mundosolar_entity::product::model::{CreateProduct, UpdateProduct};
use mundosolar_entity::product::movement::NewMovement;

use crate::dto::request::ListQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::HandlerResult;
use crate::extractors::{AuthStaff, PaginationParams};
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(query): Query<ListQuery>,
) -> HandlerResult<Json<serde_json::Value>> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(25));
    let result = state
        .inventory_service
        .list_products(&auth, &page, query.search.as_deref())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let product = state.inventory_service.get_product(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": product })))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<CreateProduct>,
) -> HandlerResult<Json<serde_json::Value>> {
    let product = state.inventory_service.create_product(&auth, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": product })))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProduct>,
) -> HandlerResult<Json<serde_json::Value>> {
    let product = state
        .inventory_service
        .update_product(&auth, id, req)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": product })))
}

/// DELETE /api/products/:id
pub async fn deactivate_product(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<ApiResponse<MessageResponse>>> {
    state.inventory_service.deactivate_product(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Product deactivated".to_string(),
    })))
}

/// POST /api/inventory/movements
pub async fn record_movement(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<NewMovement>,
) -> HandlerResult<Json<serde_json::Value>> {
    let (movement, product) = state.inventory_service.record_movement(&auth, req).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "movement": movement, "product": product },
    })))
}

/// GET /api/products/:id/movements
pub async fn list_movements(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> HandlerResult<Json<serde_json::Value>> {
    let result = state
        .inventory_service
        .list_movements(&auth, id, &params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/inventory/low-stock
pub async fn low_stock(
    State(state): State<AppState>,
    auth: AuthStaff,
) -> HandlerResult<Json<serde_json::Value>> {
    let products = state.inventory_service.low_stock(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": products })))
}
