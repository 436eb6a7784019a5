//! Request DTOs with validation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mundosolar_entity::maintenance::{MaintenancePriority, MaintenanceStatus, MaintenanceType};
use mundosolar_entity::order::{NewOrderItem, OrderStatus, PaymentMethod};

/// Staff login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Portal login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PortalLoginRequest {
    /// Client email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Portal password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Password set/reset request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPasswordRequest {
    /// New password.
    #[validate(length(min = 8))]
    pub password: String,
}

/// Role change request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role.
    pub role: String,
}

/// Create order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Client placing the order.
    pub client_id: Uuid,
    /// Order lines.
    pub items: Vec<NewOrderItem>,
    /// Notes.
    pub notes: Option<String>,
}

/// Order status update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    /// Target status.
    pub status: OrderStatus,
}

/// Register payment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPaymentRequest {
    /// Amount received.
    pub amount: Decimal,
    /// How it was received.
    pub method: PaymentMethod,
    /// Bank/transaction reference.
    pub reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// When the money was received; defaults to now.
    pub paid_at: Option<DateTime<Utc>>,
}

/// Issue invoice request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueInvoiceRequest {
    /// Order to invoice.
    pub order_id: Uuid,
    /// SAT "uso de CFDI" code.
    #[validate(length(min = 1, max = 4))]
    pub cfdi_use: String,
    /// SAT "forma de pago" code.
    #[validate(length(min = 1, max = 4))]
    pub payment_form: String,
}

/// Record-stamp request, carrying the fiscal UUID returned by the PAC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampInvoiceRequest {
    /// Fiscal UUID assigned by the PAC.
    pub fiscal_uuid: Uuid,
}

/// Portal maintenance request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MaintenanceRequestBody {
    /// Kind of work requested.
    pub maintenance_type: MaintenanceType,
    /// Short title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Problem description.
    pub description: Option<String>,
    /// Date the client would prefer.
    pub preferred_date: Option<DateTime<Utc>>,
    /// Specific system, when the client selected one.
    pub solar_system_id: Option<Uuid>,
    /// Urgency.
    pub priority: Option<MaintenancePriority>,
}

/// Staff maintenance scheduling body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScheduleMaintenanceRequest {
    /// Client whose installation is serviced.
    pub client_id: Uuid,
    /// Specific system, when known.
    pub solar_system_id: Option<Uuid>,
    /// Kind of work.
    pub maintenance_type: MaintenanceType,
    /// Short title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Scheduled date and hour of the visit.
    pub scheduled_date: DateTime<Utc>,
    /// Urgency.
    pub priority: Option<MaintenancePriority>,
    /// Technicians assigned; first is the lead.
    pub technician_ids: Vec<Uuid>,
}

/// Maintenance status transition body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionStatusRequest {
    /// Target status.
    pub status: MaintenanceStatus,
    /// Notes appended to the history entry.
    pub notes: Option<String>,
}

/// Availability query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    /// Day to check.
    pub date: NaiveDate,
    /// Specific technician (admin view).
    pub technician_id: Option<Uuid>,
}

/// Search/list query parameters shared by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Free-text search term.
    pub search: Option<String>,
    /// Filter by client.
    pub client_id: Option<Uuid>,
    /// Filter by status (maintenance list).
    pub status: Option<MaintenanceStatus>,
    /// Filter by technician (maintenance list).
    pub technician_id: Option<Uuid>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

/// Bulk monitoring query body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkMonitoringRequest {
    /// Clients to fetch cached metrics for.
    pub client_ids: Vec<Uuid>,
}

/// Months parameter for the sales report.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesReportQuery {
    /// Trailing months to include (default 6).
    pub months: Option<u32>,
}
