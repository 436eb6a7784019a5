//! Product catalog and inventory-ledger workflows.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_database::repositories::product::ProductRepository;
use mundosolar_entity::product::model::{CreateProduct, UpdateProduct};
use mundosolar_entity::product::movement::NewMovement;
use mundosolar_entity::product::{InventoryMovement, Product};

use crate::context::StaffContext;

/// Manages the product catalog and the inventory ledger.
#[derive(Debug, Clone)]
pub struct InventoryService {
    product_repo: Arc<ProductRepository>,
}

impl InventoryService {
    /// Creates a new inventory service.
    pub fn new(product_repo: Arc<ProductRepository>) -> Self {
        Self { product_repo }
    }

    /// Lists products with optional search.
    pub async fn list_products(
        &self,
        ctx: &StaffContext,
        page: &PageRequest,
        search: Option<&str>,
    ) -> Result<PageResponse<Product>, AppError> {
        policy::authorize(ctx.role, Resource::Inventory, Action::Read)?;
        self.product_repo.find_all(page, search).await
    }

    /// Fetches one product.
    pub async fn get_product(&self, ctx: &StaffContext, id: Uuid) -> Result<Product, AppError> {
        policy::authorize(ctx.role, Resource::Inventory, Action::Read)?;
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Creates a product.
    pub async fn create_product(
        &self,
        ctx: &StaffContext,
        data: CreateProduct,
    ) -> Result<Product, AppError> {
        policy::authorize(ctx.role, Resource::Inventory, Action::Write)?;

        if data.sku.trim().is_empty() {
            return Err(AppError::validation("SKU is required"));
        }
        if data.unit_price < Decimal::ZERO || data.unit_cost < Decimal::ZERO {
            return Err(AppError::validation("Prices cannot be negative"));
        }
        if let Some(existing) = self.product_repo.find_by_sku(&data.sku).await? {
            return Err(AppError::conflict(format!(
                "SKU '{}' is already in use",
                existing.sku
            )));
        }

        let product = self.product_repo.create(&data).await?;
        info!(product_id = %product.id, actor = %ctx.user_id, "Product created");
        Ok(product)
    }

    /// Updates product fields.
    pub async fn update_product(
        &self,
        ctx: &StaffContext,
        id: Uuid,
        data: UpdateProduct,
    ) -> Result<Product, AppError> {
        policy::authorize(ctx.role, Resource::Inventory, Action::Write)?;
        self.product_repo
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Deactivates a product.
    pub async fn deactivate_product(&self, ctx: &StaffContext, id: Uuid) -> Result<(), AppError> {
        policy::authorize(ctx.role, Resource::Inventory, Action::Delete)?;
        self.get_product(ctx, id).await?;
        self.product_repo.set_active(id, false).await?;
        info!(product_id = %id, actor = %ctx.user_id, "Product deactivated");
        Ok(())
    }

    /// Records an inventory movement, adjusting stock atomically.
    pub async fn record_movement(
        &self,
        ctx: &StaffContext,
        data: NewMovement,
    ) -> Result<(InventoryMovement, Product), AppError> {
        policy::authorize(ctx.role, Resource::Inventory, Action::Write)?;

        if data.quantity == 0 {
            return Err(AppError::validation("Quantity cannot be zero"));
        }
        if data.quantity < 0
            && !matches!(
                data.movement_type,
                mundosolar_entity::product::MovementType::Adjustment
            )
        {
            return Err(AppError::validation(
                "Only adjustments may carry a negative quantity",
            ));
        }

        let (movement, product) = self.product_repo.record_movement(&data, ctx.user_id).await?;
        info!(
            product_id = %product.id,
            movement_id = %movement.id,
            stock = product.stock_quantity,
            "Inventory movement recorded"
        );
        Ok((movement, product))
    }

    /// Lists a product's movements.
    pub async fn list_movements(
        &self,
        ctx: &StaffContext,
        product_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<InventoryMovement>, AppError> {
        policy::authorize(ctx.role, Resource::Inventory, Action::Read)?;
        self.product_repo.find_movements(product_id, page).await
    }

    /// Lists products at or below their reorder level.
    pub async fn low_stock(&self, ctx: &StaffContext) -> Result<Vec<Product>, AppError> {
        policy::authorize(ctx.role, Resource::Inventory, Action::Read)?;
        self.product_repo.find_low_stock().await
    }
}
