//! Client repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::result::AppResult;
use mundosolar_core::types::pagination::{PageRequest, PageResponse};
use mundosolar_entity::client::model::{CreateClient, UpdateClient};
use mundosolar_entity::client::Client;

/// Repository for client CRUD and query operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new client repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a client by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client by id", e)
            })
    }

    /// Find a client by portal email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client by email", e)
            })
    }

    /// List clients with pagination and an optional name/RFC search term.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<&str>,
    ) -> AppResult<PageResponse<Client>> {
        let pattern = search.map(|s| format!("%{s}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM clients \
             WHERE $1::text IS NULL OR name ILIKE $1 OR rfc ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count clients", e))?;

        let clients = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients \
             WHERE $1::text IS NULL OR name ILIKE $1 OR rfc ILIKE $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clients", e))?;

        Ok(PageResponse::new(
            clients,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new client.
    pub async fn create(&self, data: &CreateClient) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (name, email, phone, rfc, address, portal_password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.rfc)
        .bind(&data.address)
        .bind(&data.portal_password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create client", e))
    }

    /// Update fields of an existing client.
    pub async fn update(&self, id: Uuid, data: &UpdateClient) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                phone = COALESCE($4, phone), \
                rfc = COALESCE($5, rfc), \
                address = COALESCE($6, address), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.rfc)
        .bind(&data.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update client", e))
    }

    /// Replace a client's portal password hash.
    pub async fn update_portal_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE clients SET portal_password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update portal password", e)
        })?;
        Ok(())
    }

    /// Activate or deactivate a client.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<()> {
        sqlx::query("UPDATE clients SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update client status", e)
            })?;
        Ok(())
    }

    /// Count active clients.
    pub async fn count_active(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count clients", e))
    }
}
