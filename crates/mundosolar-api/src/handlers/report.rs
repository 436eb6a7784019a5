//! Report handlers.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::SalesReportQuery;
use crate::error::HandlerResult;
use crate::extractors::AuthStaff;
use crate::state::AppState;

/// GET /api/reports/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthStaff,
) -> HandlerResult<Json<serde_json::Value>> {
    let summary = state.report_service.dashboard(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": summary })))
}

/// GET /api/reports/sales?months=6
pub async fn sales(
    State(state): State<AppState>,
    auth: AuthStaff,
    Query(query): Query<SalesReportQuery>,
) -> HandlerResult<Json<serde_json::Value>> {
    let report = state
        .report_service
        .monthly_sales(&auth, query.months.unwrap_or(6))
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": report })))
}
