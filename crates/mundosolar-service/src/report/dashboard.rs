//! Dashboard summary and monthly sales report generation.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_database::repositories::client::ClientRepository;
use mundosolar_database::repositories::maintenance::MaintenanceRepository;
use mundosolar_database::repositories::order::OrderRepository;
use mundosolar_database::repositories::product::ProductRepository;
use mundosolar_database::retry::with_retry_once;
use mundosolar_entity::maintenance::MaintenanceStatus;

use crate::context::StaffContext;

/// Aggregate figures for the admin dashboard.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DashboardSummary {
    /// Active clients.
    pub active_clients: i64,
    /// Maintenance requests awaiting approval.
    pub pending_maintenance: i64,
    /// Scheduled maintenance visits.
    pub scheduled_maintenance: i64,
    /// Visits currently in progress.
    pub in_progress_maintenance: i64,
    /// Payments received this calendar month.
    pub revenue_this_month: Decimal,
    /// Outstanding receivables across open orders.
    pub total_receivables: Decimal,
    /// Orders created in the last 30 days.
    pub orders_last_30_days: i64,
    /// Products at or below reorder level.
    pub low_stock_products: i64,
}

/// Sales figures for one month.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MonthlySales {
    /// First day of the month (UTC).
    pub month_start: DateTime<Utc>,
    /// Orders created in the month.
    pub order_count: i64,
    /// Payments received in the month.
    pub payments_received: Decimal,
}

/// Generates the dashboard summary and sales reports. Read-only; every
/// query goes through the retry-once helper.
#[derive(Debug, Clone)]
pub struct ReportService {
    client_repo: Arc<ClientRepository>,
    order_repo: Arc<OrderRepository>,
    maintenance_repo: Arc<MaintenanceRepository>,
    product_repo: Arc<ProductRepository>,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(
        client_repo: Arc<ClientRepository>,
        order_repo: Arc<OrderRepository>,
        maintenance_repo: Arc<MaintenanceRepository>,
        product_repo: Arc<ProductRepository>,
    ) -> Self {
        Self {
            client_repo,
            order_repo,
            maintenance_repo,
            product_repo,
        }
    }

    /// Builds the dashboard summary.
    pub async fn dashboard(&self, ctx: &StaffContext) -> Result<DashboardSummary, AppError> {
        policy::authorize(ctx.role, Resource::Reports, Action::Read)?;

        let now = Utc::now();
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        let thirty_days_ago = now - Duration::days(30);

        let active_clients =
            with_retry_once("dashboard.active_clients", || self.client_repo.count_active()).await?;
        let pending_maintenance = with_retry_once("dashboard.pending_maintenance", || {
            self.maintenance_repo
                .count_by_status(MaintenanceStatus::PendingApproval)
        })
        .await?;
        let scheduled_maintenance = with_retry_once("dashboard.scheduled_maintenance", || {
            self.maintenance_repo
                .count_by_status(MaintenanceStatus::Scheduled)
        })
        .await?;
        let in_progress_maintenance = with_retry_once("dashboard.in_progress_maintenance", || {
            self.maintenance_repo
                .count_by_status(MaintenanceStatus::InProgress)
        })
        .await?;
        let revenue_this_month = with_retry_once("dashboard.revenue_this_month", || {
            self.order_repo.payments_received_between(month_start, now)
        })
        .await?;
        let total_receivables =
            with_retry_once("dashboard.receivables", || self.order_repo.total_receivables())
                .await?;
        let orders_last_30_days = with_retry_once("dashboard.orders_30d", || {
            self.order_repo.count_created_between(thirty_days_ago, now)
        })
        .await?;
        let low_stock_products =
            with_retry_once("dashboard.low_stock", || self.product_repo.count_low_stock()).await?;

        Ok(DashboardSummary {
            active_clients,
            pending_maintenance,
            scheduled_maintenance,
            in_progress_maintenance,
            revenue_this_month,
            total_receivables,
            orders_last_30_days,
            low_stock_products,
        })
    }

    /// Monthly sales figures for the trailing `months` months, oldest
    /// first.
    pub async fn monthly_sales(
        &self,
        ctx: &StaffContext,
        months: u32,
    ) -> Result<Vec<MonthlySales>, AppError> {
        policy::authorize(ctx.role, Resource::Reports, Action::Read)?;

        let months = months.clamp(1, 24);
        let now = Utc::now();
        let mut report = Vec::with_capacity(months as usize);

        let mut year = now.year();
        let mut month = now.month();
        let mut bounds = Vec::with_capacity(months as usize);
        for _ in 0..months {
            let start = Utc
                .with_ymd_and_hms(year, month, 1, 0, 0, 0)
                .single()
                .ok_or_else(|| AppError::internal("Invalid month boundary"))?;
            bounds.push(start);
            if month == 1 {
                month = 12;
                year -= 1;
            } else {
                month -= 1;
            }
        }
        bounds.reverse();

        for (i, start) in bounds.iter().enumerate() {
            let end = bounds.get(i + 1).copied().unwrap_or(now);
            let order_count = with_retry_once("report.monthly_orders", || {
                self.order_repo.count_created_between(*start, end)
            })
            .await?;
            let payments_received = with_retry_once("report.monthly_payments", || {
                self.order_repo.payments_received_between(*start, end)
            })
            .await?;
            report.push(MonthlySales {
                month_start: *start,
                order_count,
                payments_received,
            });
        }

        Ok(report)
    }
}
