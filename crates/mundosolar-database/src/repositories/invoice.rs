//! Invoice repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::result::AppResult;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_entity::invoice::{Invoice, InvoiceStatus};
use rust_decimal::Decimal;

/// Repository for CFDI invoice records.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    /// Create a new invoice repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an invoice by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invoice", e))
    }

    /// Find the live (non-cancelled) invoice for an order, if any.
    pub async fn find_live_by_order(&self, order_id: Uuid) -> AppResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices WHERE order_id = $1 AND status <> 'cancelled'",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find invoice for order", e)
        })
    }

    /// List invoices with pagination, optionally filtered by client.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        client_id: Option<Uuid>,
    ) -> AppResult<PageResponse<Invoice>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invoices WHERE $1::uuid IS NULL OR client_id = $1",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count invoices", e))?;

        let invoices = sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices WHERE $1::uuid IS NULL OR client_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(client_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invoices", e))?;

        Ok(PageResponse::new(
            invoices,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Issue an invoice, allocating the next folio in the series from a
    /// database sequence.
    pub async fn create(
        &self,
        order_id: Uuid,
        client_id: Uuid,
        series: &str,
        cfdi_use: &str,
        payment_form: &str,
        total: Decimal,
    ) -> AppResult<Invoice> {
        sqlx::query_as::<_, Invoice>(
            "INSERT INTO invoices \
                (order_id, client_id, series, folio, cfdi_use, payment_form, total) \
             VALUES ($1, $2, $3, nextval('invoice_folio_seq'), $4, $5, $6) RETURNING *",
        )
        .bind(order_id)
        .bind(client_id)
        .bind(series)
        .bind(cfdi_use)
        .bind(payment_form)
        .bind(total)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create invoice", e))
    }

    /// Record the PAC stamp on a draft invoice.
    pub async fn mark_stamped(&self, id: Uuid, fiscal_uuid: Uuid) -> AppResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET \
                status = $2, fiscal_uuid = $3, stamped_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'draft' RETURNING *",
        )
        .bind(id)
        .bind(InvoiceStatus::Stamped)
        .bind(fiscal_uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to stamp invoice", e))
    }

    /// Cancel an invoice.
    pub async fn mark_cancelled(&self, id: Uuid) -> AppResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET \
                status = $2, cancelled_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status <> 'cancelled' RETURNING *",
        )
        .bind(id)
        .bind(InvoiceStatus::Cancelled)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel invoice", e))
    }
}
