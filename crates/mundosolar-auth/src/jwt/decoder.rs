//! JWT validation and claims extraction.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use mundosolar_core::config::auth::AuthConfig;
use mundosolar_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates staff JWTs and extracts their claims.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation parameters.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder").finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decodes and validates an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::unauthorized("Expected an access token"));
        }
        Ok(claims)
    }

    /// Decodes and validates a refresh token.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::unauthorized("Expected a refresh token"));
        }
        Ok(claims)
    }

    fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use mundosolar_entity::user::UserRole;
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-not-for-production".to_string(),
            jwt_access_ttl_minutes: 30,
            jwt_refresh_ttl_hours: 72,
            portal_token_ttl_hours: 24,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let user_id = Uuid::new_v4();

        let pair = encoder
            .generate_token_pair(user_id, UserRole::Manager, "lucia")
            .unwrap();

        let claims = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.role, UserRole::Manager);
        assert_eq!(claims.username, "lucia");
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let pair = encoder
            .generate_token_pair(Uuid::new_v4(), UserRole::Admin, "root")
            .unwrap();

        assert!(decoder.decode_access_token(&pair.refresh_token).is_err());
        assert!(decoder.decode_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&config());
        let pair = encoder
            .generate_token_pair(Uuid::new_v4(), UserRole::Admin, "root")
            .unwrap();

        let mut other = config();
        other.jwt_secret = "a-different-secret".to_string();
        let decoder = JwtDecoder::new(&other);
        assert!(decoder.decode_access_token(&pair.access_token).is_err());
    }
}
