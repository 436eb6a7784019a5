//! Product and inventory repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::result::AppResult;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_entity::product::model::{CreateProduct, UpdateProduct};
use mundosolar_entity::product::movement::NewMovement;
use mundosolar_entity::product::{InventoryMovement, Product};

/// Repository for the product catalog and the inventory ledger.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a product by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    /// Find a product by SKU.
    pub async fn find_by_sku(&self, sku: &str) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE sku = $1")
            .bind(sku)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find product by sku", e)
            })
    }

    /// List products with pagination and an optional search term.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<&str>,
    ) -> AppResult<PageResponse<Product>> {
        let pattern = search.map(|s| format!("%{s}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products \
             WHERE $1::text IS NULL OR name ILIKE $1 OR sku ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count products", e))?;

        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products \
             WHERE $1::text IS NULL OR name ILIKE $1 OR sku ILIKE $1 \
             ORDER BY name LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list products", e))?;

        Ok(PageResponse::new(
            products,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List active products at or below their reorder level.
    pub async fn find_low_stock(&self) -> AppResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products \
             WHERE is_active = TRUE AND stock_quantity <= reorder_level \
             ORDER BY stock_quantity",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list low-stock products", e)
        })
    }

    /// Count active products at or below their reorder level.
    pub async fn count_low_stock(&self) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM products \
             WHERE is_active = TRUE AND stock_quantity <= reorder_level",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count low stock", e))
    }

    /// Create a new product.
    pub async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products \
                (sku, name, description, category, unit_price, unit_cost, stock_quantity, reorder_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.sku)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(data.unit_price)
        .bind(data.unit_cost)
        .bind(data.stock_quantity)
        .bind(data.reorder_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create product", e))
    }

    /// Update fields of an existing product.
    pub async fn update(&self, id: Uuid, data: &UpdateProduct) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                category = COALESCE($4, category), \
                unit_price = COALESCE($5, unit_price), \
                unit_cost = COALESCE($6, unit_cost), \
                reorder_level = COALESCE($7, reorder_level), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(data.unit_price)
        .bind(data.unit_cost)
        .bind(data.reorder_level)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update product", e))
    }

    /// Activate or deactivate a product.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<()> {
        sqlx::query("UPDATE products SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update product status", e)
            })?;
        Ok(())
    }

    /// Record an inventory movement and adjust the product's stock in one
    /// transaction. The stock row is locked so concurrent movements on the
    /// same product serialize.
    pub async fn record_movement(
        &self,
        data: &NewMovement,
        recorded_by: Uuid,
    ) -> AppResult<(InventoryMovement, Product)> {
        let delta = data.movement_type.signed_delta(data.quantity);

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(data.product_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock product", e))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

        let new_stock = product.stock_quantity + delta;
        if new_stock < 0 {
            return Err(AppError::validation(format!(
                "Movement would drive stock below zero ({} on hand, {} requested)",
                product.stock_quantity, delta
            )));
        }

        let movement = sqlx::query_as::<_, InventoryMovement>(
            "INSERT INTO inventory_movements \
                (product_id, movement_type, quantity, reference, notes, recorded_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.product_id)
        .bind(data.movement_type)
        .bind(data.quantity)
        .bind(&data.reference)
        .bind(&data.notes)
        .bind(recorded_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record movement", e))?;

        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET stock_quantity = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.product_id)
        .bind(new_stock)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to adjust stock", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit movement", e)
        })?;

        Ok((movement, product))
    }

    /// List movements for a product, newest first.
    pub async fn find_movements(
        &self,
        product_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<InventoryMovement>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_movements WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count movements", e)
                })?;

        let movements = sqlx::query_as::<_, InventoryMovement>(
            "SELECT * FROM inventory_movements WHERE product_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(product_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list movements", e))?;

        Ok(PageResponse::new(
            movements,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
