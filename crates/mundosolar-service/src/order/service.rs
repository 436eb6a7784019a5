//! Order workflows, including the transactional payment ledger.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::config::billing::BillingConfig;
use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_database::repositories::client::ClientRepository;
use mundosolar_database::repositories::order::{OrderRepository, PricedItem};
use mundosolar_database::repositories::product::ProductRepository;
use mundosolar_entity::order::model::CreateOrder;
use mundosolar_entity::order::payment::NewPayment;
use mundosolar_entity::order::{Order, OrderItem, OrderStatus, Payment};

use crate::context::{PortalContext, StaffContext};

/// An order with its items and payments.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderDetail {
    /// The order header.
    pub order: Order,
    /// Its line items.
    pub items: Vec<OrderItem>,
    /// Its payments, newest first.
    pub payments: Vec<Payment>,
}

/// Result of registering a payment.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PaymentResult {
    /// The created payment row.
    pub payment: Payment,
    /// The order with recomputed aggregates.
    pub order: Order,
}

/// Manages orders and their payment ledger.
#[derive(Debug, Clone)]
pub struct OrderService {
    order_repo: Arc<OrderRepository>,
    product_repo: Arc<ProductRepository>,
    client_repo: Arc<ClientRepository>,
    billing: BillingConfig,
}

impl OrderService {
    /// Creates a new order service.
    pub fn new(
        order_repo: Arc<OrderRepository>,
        product_repo: Arc<ProductRepository>,
        client_repo: Arc<ClientRepository>,
        billing: BillingConfig,
    ) -> Self {
        Self {
            order_repo,
            product_repo,
            client_repo,
            billing,
        }
    }

    /// Lists orders, optionally for one client.
    pub async fn list(
        &self,
        ctx: &StaffContext,
        page: &PageRequest,
        client_id: Option<Uuid>,
    ) -> Result<PageResponse<Order>, AppError> {
        policy::authorize(ctx.role, Resource::Orders, Action::Read)?;
        self.order_repo.find_all(page, client_id).await
    }

    /// Lists the portal client's own orders.
    pub async fn list_own(
        &self,
        ctx: &PortalContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Order>, AppError> {
        self.order_repo.find_all(page, Some(ctx.client_id)).await
    }

    /// Fetches an order with items and payments.
    pub async fn get(&self, ctx: &StaffContext, id: Uuid) -> Result<OrderDetail, AppError> {
        policy::authorize(ctx.role, Resource::Orders, Action::Read)?;
        self.load_detail(id).await
    }

    /// Fetches one of the portal client's own orders.
    pub async fn get_own(&self, ctx: &PortalContext, id: Uuid) -> Result<OrderDetail, AppError> {
        let detail = self.load_detail(id).await?;
        if detail.order.client_id != ctx.client_id {
            return Err(AppError::not_found("Order not found"));
        }
        Ok(detail)
    }

    async fn load_detail(&self, id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;
        let items = self.order_repo.find_items(id).await?;
        let payments = self.order_repo.find_payments(id).await?;
        Ok(OrderDetail {
            order,
            items,
            payments,
        })
    }

    /// Creates an order, pricing each line from the catalog and computing
    /// subtotal, IVA, and total server-side.
    pub async fn create(&self, ctx: &StaffContext, data: CreateOrder) -> Result<OrderDetail, AppError> {
        policy::authorize(ctx.role, Resource::Orders, Action::Write)?;

        if data.items.is_empty() {
            return Err(AppError::validation("An order needs at least one item"));
        }
        self.client_repo
            .find_by_id(data.client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        let mut priced = Vec::with_capacity(data.items.len());
        let mut subtotal = Decimal::ZERO;
        for item in &data.items {
            if item.quantity <= 0 {
                return Err(AppError::validation("Item quantity must be positive"));
            }
            let product = self
                .product_repo
                .find_by_id(item.product_id)
                .await?
                .ok_or_else(|| AppError::not_found("Product not found"))?;
            if !product.is_active {
                return Err(AppError::validation(format!(
                    "Product '{}' is inactive",
                    product.sku
                )));
            }

            let unit_price = item.unit_price.unwrap_or(product.unit_price);
            if unit_price < Decimal::ZERO {
                return Err(AppError::validation("Unit price cannot be negative"));
            }
            let line_total = unit_price * Decimal::from(item.quantity);
            subtotal += line_total;
            priced.push(PricedItem {
                product_id: product.id,
                description: product.name,
                quantity: item.quantity,
                unit_price,
                line_total,
            });
        }

        let tax_amount =
            (subtotal * Decimal::from(self.billing.tax_rate_percent) / Decimal::from(100))
                .round_dp(2);
        let total = subtotal + tax_amount;

        let (order, items) = self
            .order_repo
            .create_with_items(
                data.client_id,
                &self.billing.order_folio_prefix,
                subtotal,
                tax_amount,
                total,
                data.notes.as_deref(),
                ctx.user_id,
                &priced,
            )
            .await?;

        info!(order_id = %order.id, folio = %order.folio, actor = %ctx.user_id, "Order created");
        Ok(OrderDetail {
            order,
            items,
            payments: Vec::new(),
        })
    }

    /// Moves an order through its lifecycle. Cancelling is rejected once
    /// any payment has been collected.
    pub async fn update_status(
        &self,
        ctx: &StaffContext,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, AppError> {
        policy::authorize(ctx.role, Resource::Orders, Action::Write)?;

        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        if status == OrderStatus::Cancelled && order.amount_paid > Decimal::ZERO {
            return Err(AppError::conflict(
                "Cannot cancel an order that has payments; delete them first",
            ));
        }

        let order = self
            .order_repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        info!(order_id = %id, status = %status, actor = %ctx.user_id, "Order status updated");
        Ok(order)
    }

    /// Registers a payment against an order. Runs as one atomic unit: the
    /// payment row and the recomputed order aggregates commit together.
    pub async fn add_payment(
        &self,
        ctx: &StaffContext,
        order_id: Uuid,
        data: NewPayment,
    ) -> Result<PaymentResult, AppError> {
        policy::authorize(ctx.role, Resource::Orders, Action::Write)?;

        if data.amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be positive"));
        }

        let (payment, order) = self
            .order_repo
            .add_payment(order_id, &data, ctx.user_id)
            .await?;

        info!(
            order_id = %order_id,
            payment_id = %payment.id,
            amount = %payment.amount,
            balance_due = %order.balance_due,
            "Payment registered"
        );
        Ok(PaymentResult { payment, order })
    }

    /// Deletes a payment, recomputing the order aggregates in the same
    /// transaction. The collected amount is floored at zero.
    pub async fn delete_payment(
        &self,
        ctx: &StaffContext,
        order_id: Uuid,
        payment_id: Uuid,
    ) -> Result<Order, AppError> {
        policy::authorize(ctx.role, Resource::Orders, Action::Delete)?;

        let order = self
            .order_repo
            .delete_payment(order_id, payment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Payment not found on this order"))?;

        info!(
            order_id = %order_id,
            payment_id = %payment_id,
            balance_due = %order.balance_due,
            actor = %ctx.user_id,
            "Payment deleted"
        );
        Ok(order)
    }
}
