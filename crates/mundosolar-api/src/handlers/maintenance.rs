//! Maintenance workflow handlers (staff side).

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::PageRequest;
use mundosolar_database::repositories::maintenance::MaintenanceFilter;
use mundosolar_entity::maintenance::model::CreateScheduled;

use crate::dto::request::{
    AvailabilityQuery, ListQuery, ScheduleMaintenanceRequest, TransitionStatusRequest,
};
use crate::error::HandlerResult;
use crate::extractors::AuthStaff;
use crate::state::AppState;

/// GET /api/maintenance
pub async fn list_maintenance(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(query): Query<ListQuery>,
) -> HandlerResult<Json<serde_json::Value>> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(25));
    let filter = MaintenanceFilter {
        client_id: query.client_id,
        status: query.status,
        technician_id: query.technician_id,
    };
    let result = state.maintenance_service.list(&auth, &page, filter).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/maintenance/:id
pub async fn get_maintenance(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
) -> HandlerResult<Json<serde_json::Value>> {
    let record = state.maintenance_service.get(&auth, id).await?;
    let history = state.maintenance_service.history(&auth, id).await?;
    let assignments = state.maintenance_service.assignments(&auth, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "record": record, "history": history, "assignments": assignments },
    })))
}

/// POST /api/maintenance
pub async fn create_maintenance(
    State(state): State<AppState>,
    auth: AuthStaff,
    Json(req): Json<ScheduleMaintenanceRequest>,
) -> HandlerResult<Json<serde_json::Value>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let record = state
        .maintenance_service
        .create_scheduled(
            &auth,
            CreateScheduled {
                client_id: req.client_id,
                solar_system_id: req.solar_system_id,
                maintenance_type: req.maintenance_type,
                title: req.title,
                description: req.description,
                scheduled_date: req.scheduled_date,
                priority: req.priority,
                technician_ids: req.technician_ids,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// PUT /api/maintenance/:id/status
pub async fn transition_status(
    State(state): State<AppState>,
    auth: AuthStaff,
    Path(id): Path<Uuid>,
    Json(req): Json<TransitionStatusRequest>,
) -> HandlerResult<Json<serde_json::Value>> {
    let record = state
        .maintenance_service
        .transition_status(&auth, id, req.status, req.notes.as_deref())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": record })))
}

/// GET /api/maintenance/availability?date=…[&technician_id=…]
///
/// Without a technician: the client-facing view (a slot is free when at
/// least one technician is free). With one: that technician's hours.
pub async fn availability(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(query): Query<AvailabilityQuery>,
) -> HandlerResult<Json<serde_json::Value>> {
    let slots = match query.technician_id {
        Some(technician_id) => {
            state
                .availability_service
                .technician_availability(&auth, technician_id, query.date)
                .await?
        }
        None => state.availability_service.hourly_availability(query.date).await?,
    };
    Ok(Json(serde_json::json!({ "success": true, "data": slots })))
}

/// GET /api/maintenance/technicians — the active roster for scheduling.
pub async fn technicians(
    State(state): State<AppState>,
    auth: AuthStaff,
) -> HandlerResult<Json<serde_json::Value>> {
    let technicians = state.user_service.technicians(&auth).await?;
    let roster: Vec<crate::dto::response::UserResponse> =
        technicians.into_iter().map(Into::into).collect();
    Ok(Json(serde_json::json!({ "success": true, "data": roster })))
}
