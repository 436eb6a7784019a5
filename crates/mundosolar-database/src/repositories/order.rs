//! Order repository implementation, including the transactional payment
//! ledger.
//!
//! `add_payment` and `delete_payment` are the two write paths where
//! atomicity matters: the payment row and the recomputed order aggregates
//! must land together, so both run inside one transaction with the order
//! row locked (`FOR UPDATE`). Concurrent payments against the same order
//! serialize on that lock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::result::AppResult;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_entity::order::ledger;
use mundosolar_entity::order::payment::NewPayment;
use mundosolar_entity::order::{Order, OrderItem, OrderStatus, Payment};

/// A fully-priced order line ready for insertion.
#[derive(Debug, Clone)]
pub struct PricedItem {
    /// Catalog product sold.
    pub product_id: Uuid,
    /// Line description.
    pub description: String,
    /// Units sold.
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// `quantity * unit_price`.
    pub line_total: Decimal,
}

/// Repository for order CRUD and the payment ledger.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an order by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find order", e))
    }

    /// List orders with pagination, optionally filtered by client.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        client_id: Option<Uuid>,
    ) -> AppResult<PageResponse<Order>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE $1::uuid IS NULL OR client_id = $1",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count orders", e))?;

        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE $1::uuid IS NULL OR client_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(client_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list orders", e))?;

        Ok(PageResponse::new(
            orders,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create an order with its items in one transaction. The folio is
    /// allocated from a database sequence so it is gapless per insert
    /// attempt and never reused.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_with_items(
        &self,
        client_id: Uuid,
        folio_prefix: &str,
        subtotal: Decimal,
        tax_amount: Decimal,
        total: Decimal,
        notes: Option<&str>,
        created_by: Uuid,
        items: &[PricedItem],
    ) -> AppResult<(Order, Vec<OrderItem>)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let seq: i64 = sqlx::query_scalar("SELECT nextval('order_folio_seq')")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to allocate folio", e)
            })?;
        let folio = format!("{folio_prefix}-{seq:06}");

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders \
                (client_id, folio, subtotal, tax_amount, total, balance_due, notes, created_by) \
             VALUES ($1, $2, $3, $4, $5, $5, $6, $7) RETURNING *",
        )
        .bind(client_id)
        .bind(&folio)
        .bind(subtotal)
        .bind(tax_amount)
        .bind(total)
        .bind(notes)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create order", e))?;

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items \
                    (order_id, product_id, description, quantity, unit_price, line_total) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.line_total)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create order item", e)
            })?;
            inserted.push(row);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit order", e))?;

        Ok((order, inserted))
    }

    /// List the items on an order.
    pub async fn find_items(&self, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
        sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list order items", e))
    }

    /// List the payments on an order, newest first.
    pub async fn find_payments(&self, order_id: Uuid) -> AppResult<Vec<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE order_id = $1 ORDER BY paid_at DESC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list payments", e))
    }

    /// Update an order's lifecycle status.
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update order status", e))
    }

    /// Insert a payment and recompute the order aggregates atomically.
    pub async fn add_payment(
        &self,
        order_id: Uuid,
        data: &NewPayment,
        received_by: Uuid,
    ) -> AppResult<(Payment, Order)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock order", e))?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        let paid_at = data.paid_at.unwrap_or_else(Utc::now);
        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (order_id, amount, method, reference, notes, received_by, paid_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(order_id)
        .bind(data.amount)
        .bind(data.method)
        .bind(&data.reference)
        .bind(&data.notes)
        .bind(received_by)
        .bind(paid_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create payment", e))?;

        let totals = ledger::apply_payment(order.total, order.amount_paid, data.amount);
        let order = self.write_totals(&mut tx, order_id, totals).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit payment", e)
        })?;

        Ok((payment, order))
    }

    /// Delete a payment and recompute the order aggregates atomically.
    /// Returns `None` when the payment does not belong to the order.
    pub async fn delete_payment(
        &self,
        order_id: Uuid,
        payment_id: Uuid,
    ) -> AppResult<Option<Order>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock order", e))?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        let payment = sqlx::query_as::<_, Payment>(
            "DELETE FROM payments WHERE id = $1 AND order_id = $2 RETURNING *",
        )
        .bind(payment_id)
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete payment", e))?;

        let Some(payment) = payment else {
            return Ok(None);
        };

        let totals = ledger::remove_payment(order.total, order.amount_paid, payment.amount);
        let order = self.write_totals(&mut tx, order_id, totals).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit payment deletion", e)
        })?;

        Ok(Some(order))
    }

    /// Write recomputed ledger totals onto an order inside a transaction.
    async fn write_totals(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order_id: Uuid,
        totals: ledger::LedgerTotals,
    ) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET \
                amount_paid = $2, balance_due = $3, payment_status = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(order_id)
        .bind(totals.amount_paid)
        .bind(totals.balance_due)
        .bind(totals.payment_status)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update order totals", e))
    }

    /// Sum of payments received in a period, for reports.
    pub async fn payments_received_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Decimal> {
        let sum: Option<Decimal> = sqlx::query_scalar(
            "SELECT SUM(amount) FROM payments WHERE paid_at >= $1 AND paid_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to sum payments", e))?;
        Ok(sum.unwrap_or_default())
    }

    /// Total outstanding receivables across non-cancelled orders.
    pub async fn total_receivables(&self) -> AppResult<Decimal> {
        let sum: Option<Decimal> = sqlx::query_scalar(
            "SELECT SUM(balance_due) FROM orders WHERE status <> 'cancelled'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to sum receivables", e))?;
        Ok(sum.unwrap_or_default())
    }

    /// Count orders created in a period.
    pub async fn count_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count orders", e))
    }
}
