//! Invoice workflows.
//!
//! The PAC stamping protocol is an external collaborator: this service
//! owns only the local lifecycle (issue → stamped → cancelled) and the
//! folio bookkeeping.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::config::billing::BillingConfig;
use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_database::repositories::invoice::InvoiceRepository;
use mundosolar_database::repositories::order::OrderRepository;
use mundosolar_entity::invoice::model::CreateInvoice;
use mundosolar_entity::invoice::Invoice;
use mundosolar_entity::order::OrderStatus;

use crate::context::StaffContext;

/// Manages CFDI invoices.
#[derive(Debug, Clone)]
pub struct InvoiceService {
    invoice_repo: Arc<InvoiceRepository>,
    order_repo: Arc<OrderRepository>,
    billing: BillingConfig,
}

impl InvoiceService {
    /// Creates a new invoice service.
    pub fn new(
        invoice_repo: Arc<InvoiceRepository>,
        order_repo: Arc<OrderRepository>,
        billing: BillingConfig,
    ) -> Self {
        Self {
            invoice_repo,
            order_repo,
            billing,
        }
    }

    /// Lists invoices, optionally for one client.
    pub async fn list(
        &self,
        ctx: &StaffContext,
        page: &PageRequest,
        client_id: Option<Uuid>,
    ) -> Result<PageResponse<Invoice>, AppError> {
        policy::authorize(ctx.role, Resource::Invoices, Action::Read)?;
        self.invoice_repo.find_all(page, client_id).await
    }

    /// Fetches one invoice.
    pub async fn get(&self, ctx: &StaffContext, id: Uuid) -> Result<Invoice, AppError> {
        policy::authorize(ctx.role, Resource::Invoices, Action::Read)?;
        self.invoice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice not found"))
    }

    /// Issues an invoice for a confirmed order. One live invoice per order.
    pub async fn issue(&self, ctx: &StaffContext, data: CreateInvoice) -> Result<Invoice, AppError> {
        policy::authorize(ctx.role, Resource::Invoices, Action::Write)?;

        let order = self
            .order_repo
            .find_by_id(data.order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        if matches!(order.status, OrderStatus::Draft | OrderStatus::Cancelled) {
            return Err(AppError::validation(
                "Only confirmed or delivered orders can be invoiced",
            ));
        }
        if let Some(existing) = self.invoice_repo.find_live_by_order(order.id).await? {
            return Err(AppError::conflict(format!(
                "Order already has invoice {}{}",
                existing.series, existing.folio
            )));
        }

        let invoice = self
            .invoice_repo
            .create(
                order.id,
                order.client_id,
                &self.billing.invoice_series,
                &data.cfdi_use,
                &data.payment_form,
                order.total,
            )
            .await?;

        info!(
            invoice_id = %invoice.id,
            order_id = %order.id,
            folio = invoice.folio,
            actor = %ctx.user_id,
            "Invoice issued"
        );
        Ok(invoice)
    }

    /// Records the PAC stamp on a draft invoice.
    pub async fn mark_stamped(
        &self,
        ctx: &StaffContext,
        id: Uuid,
        fiscal_uuid: Uuid,
    ) -> Result<Invoice, AppError> {
        policy::authorize(ctx.role, Resource::Invoices, Action::Write)?;

        let invoice = self
            .invoice_repo
            .mark_stamped(id, fiscal_uuid)
            .await?
            .ok_or_else(|| AppError::conflict("Invoice is not in draft state"))?;

        info!(invoice_id = %id, fiscal_uuid = %fiscal_uuid, "Invoice stamped");
        Ok(invoice)
    }

    /// Cancels an invoice.
    pub async fn cancel(&self, ctx: &StaffContext, id: Uuid) -> Result<Invoice, AppError> {
        policy::authorize(ctx.role, Resource::Invoices, Action::Delete)?;

        let invoice = self
            .invoice_repo
            .mark_cancelled(id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice not found or already cancelled"))?;

        info!(invoice_id = %id, actor = %ctx.user_id, "Invoice cancelled");
        Ok(invoice)
    }
}
