//! Client entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer of the installation company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    /// Unique client identifier.
    pub id: Uuid,
    /// Business or personal name.
    pub name: String,
    /// Contact email; also the portal login.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Mexican tax id (RFC), required for CFDI invoicing.
    pub rfc: Option<String>,
    /// Billing/installation address.
    pub address: Option<String>,
    /// Argon2 hash of the client-portal password.
    #[serde(skip_serializing)]
    pub portal_password_hash: Option<String>,
    /// Whether the client is active.
    pub is_active: bool,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Check if the client can sign in to the portal.
    pub fn portal_enabled(&self) -> bool {
        self.is_active && self.portal_password_hash.is_some()
    }
}

/// Data required to create a new client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClient {
    /// Business or personal name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Mexican tax id.
    pub rfc: Option<String>,
    /// Address.
    pub address: Option<String>,
    /// Pre-hashed portal password, when portal access is granted at creation.
    pub portal_password_hash: Option<String>,
}

/// Data for updating an existing client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClient {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New tax id.
    pub rfc: Option<String>,
    /// New address.
    pub address: Option<String>,
}
