//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use mundosolar_auth::jwt::JwtDecoder;
use mundosolar_auth::portal::PortalTokenCodec;
use mundosolar_core::config::AppConfig;
use mundosolar_service::auth::AuthService;
use mundosolar_service::client::ClientService;
use mundosolar_service::inventory::InventoryService;
use mundosolar_service::invoice::InvoiceService;
use mundosolar_service::maintenance::{AvailabilityService, MaintenanceService};
use mundosolar_service::monitoring::MonitoringService;
use mundosolar_service::notification::NotificationService;
use mundosolar_service::order::OrderService;
use mundosolar_service::report::ReportService;
use mundosolar_service::system::SolarSystemService;
use mundosolar_service::user::UserService;
use mundosolar_worker::queue::JobQueue;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// Staff JWT decoder, used by the staff extractor.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Portal token codec, used by the portal extractor.
    pub portal_codec: Arc<PortalTokenCodec>,

    // ── Services ─────────────────────────────────────────────
    /// Login and token issuance.
    pub auth_service: Arc<AuthService>,
    /// Client records.
    pub client_service: Arc<ClientService>,
    /// Solar systems.
    pub system_service: Arc<SolarSystemService>,
    /// Product catalog and inventory.
    pub inventory_service: Arc<InventoryService>,
    /// Orders and payments.
    pub order_service: Arc<OrderService>,
    /// CFDI invoices.
    pub invoice_service: Arc<InvoiceService>,
    /// Maintenance workflow.
    pub maintenance_service: Arc<MaintenanceService>,
    /// Technician availability.
    pub availability_service: Arc<AvailabilityService>,
    /// Growatt cache reader.
    pub monitoring_service: Arc<MonitoringService>,
    /// Notification inbox and fan-out.
    pub notification_service: Arc<NotificationService>,
    /// Dashboard and sales reports.
    pub report_service: Arc<ReportService>,
    /// Staff user administration.
    pub user_service: Arc<UserService>,

    // ── Background work ──────────────────────────────────────
    /// Job queue, for the manual refresh trigger and job listing.
    pub job_queue: Arc<JobQueue>,
    /// Job repository, for the admin jobs endpoints.
    pub job_repo: Arc<mundosolar_database::repositories::job::JobRepository>,
}
