//! Client-portal token codec.
//!
//! The portal runs on a separate signed token from the staff session: it
//! carries only the client identifier and an expiry, and is never
//! interchangeable with a staff JWT (distinct audience claim).

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mundosolar_core::config::auth::AuthConfig;
use mundosolar_core::error::AppError;

const PORTAL_AUDIENCE: &str = "mundosolar-portal";

/// Claims embedded in a portal token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalClaims {
    /// Subject — the client ID.
    pub sub: Uuid,
    /// Fixed audience separating portal tokens from staff JWTs.
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl PortalClaims {
    /// Returns the client ID.
    pub fn client_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// Issues and validates client-portal tokens.
#[derive(Clone)]
pub struct PortalTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_hours: i64,
}

impl std::fmt::Debug for PortalTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalTokenCodec").finish()
    }
}

impl PortalTokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[PORTAL_AUDIENCE]);
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_hours: config.portal_token_ttl_hours as i64,
        }
    }

    /// Issues a portal token for a client.
    pub fn issue(&self, client_id: Uuid) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(self.ttl_hours);
        let claims = PortalClaims {
            sub: client_id,
            aud: PORTAL_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode portal token: {e}")))?;
        Ok((token, exp))
    }

    /// Decodes a portal token, extracting the client identifier and expiry.
    pub fn decode(&self, token: &str) -> Result<PortalClaims, AppError> {
        decode::<PortalClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid portal token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use mundosolar_entity::user::UserRole;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-not-for-production".to_string(),
            jwt_access_ttl_minutes: 30,
            jwt_refresh_ttl_hours: 72,
            portal_token_ttl_hours: 24,
        }
    }

    #[test]
    fn test_portal_token_round_trip() {
        let codec = PortalTokenCodec::new(&config());
        let client_id = Uuid::new_v4();

        let (token, exp) = codec.issue(client_id).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.client_id(), client_id);
        assert_eq!(claims.expires_at().timestamp(), exp.timestamp());
    }

    #[test]
    fn test_staff_token_rejected_by_portal_codec() {
        let cfg = config();
        let codec = PortalTokenCodec::new(&cfg);
        let staff = JwtEncoder::new(&cfg)
            .generate_token_pair(Uuid::new_v4(), UserRole::Admin, "root")
            .unwrap();

        assert!(codec.decode(&staff.access_token).is_err());
    }
}
