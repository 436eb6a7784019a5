//! Staff and client-portal login flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use mundosolar_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use mundosolar_auth::password::PasswordHasher;
use mundosolar_auth::portal::PortalTokenCodec;
use mundosolar_core::error::AppError;
use mundosolar_database::repositories::client::ClientRepository;
use mundosolar_database::repositories::user::UserRepository;
use mundosolar_entity::client::Client;
use mundosolar_entity::user::User;

/// Result of a successful staff login or refresh.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StaffLoginResult {
    /// Issued token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Result of a successful portal login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PortalLoginResult {
    /// Issued portal token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The authenticated client.
    pub client: Client,
}

/// Handles credential verification and token issuance for both audiences.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    client_repo: Arc<ClientRepository>,
    hasher: Arc<PasswordHasher>,
    jwt_encoder: Arc<JwtEncoder>,
    jwt_decoder: Arc<JwtDecoder>,
    portal_codec: Arc<PortalTokenCodec>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        client_repo: Arc<ClientRepository>,
        hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        portal_codec: Arc<PortalTokenCodec>,
    ) -> Self {
        Self {
            user_repo,
            client_repo,
            hasher,
            jwt_encoder,
            jwt_decoder,
            portal_codec,
        }
    }

    /// Staff login with username and password.
    pub async fn staff_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<StaffLoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        if !user.can_login() {
            warn!(username, "Login attempt on inactive account");
            return Err(AppError::unauthorized("Account is disabled"));
        }

        let valid = self
            .hasher
            .verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let tokens = self
            .jwt_encoder
            .generate_token_pair(user.id, user.role, &user.username)?;

        self.user_repo.record_login(user.id, Utc::now()).await?;
        info!(user_id = %user.id, "Staff login");

        Ok(StaffLoginResult { tokens, user })
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<StaffLoginResult, AppError> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        if !user.can_login() {
            return Err(AppError::unauthorized("Account is disabled"));
        }

        // Re-read the role from the database so a demotion takes effect at
        // the next refresh, not at the next login.
        let tokens = self
            .jwt_encoder
            .generate_token_pair(user.id, user.role, &user.username)?;

        Ok(StaffLoginResult { tokens, user })
    }

    /// Client-portal login with email and password.
    pub async fn portal_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PortalLoginResult, AppError> {
        let client = self
            .client_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let Some(hash) = client.portal_password_hash.as_deref() else {
            return Err(AppError::unauthorized("Portal access is not enabled"));
        };
        if !client.is_active {
            return Err(AppError::unauthorized("Account is disabled"));
        }

        let valid = self.hasher.verify_password(password, hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let (token, expires_at) = self.portal_codec.issue(client.id)?;
        info!(client_id = %client.id, "Portal login");

        Ok(PortalLoginResult {
            token,
            expires_at,
            client,
        })
    }
}
