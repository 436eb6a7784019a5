//! Growatt API client.

use std::time::Duration;

use tracing::{debug, info};

use mundosolar_core::config::growatt::GrowattConfig;
use mundosolar_core::error::AppError;

use crate::legacy;
use crate::types::{GrowattPlant, GrowattSession, LoginResponse, PlantListResponse};

/// HTTP client for the Growatt monitoring API.
#[derive(Debug, Clone)]
pub struct GrowattClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl GrowattClient {
    /// Creates a new client from configuration.
    pub fn new(config: &GrowattConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Logs in with the legacy password transform and returns a session.
    pub async fn login(&self) -> Result<GrowattSession, AppError> {
        let url = format!("{}/newTwoLoginAPI.do", self.base_url);
        let hashed = legacy::hash_password(&self.password);

        debug!(username = %self.username, "Logging in to Growatt");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("userName", self.username.as_str()),
                ("password", hashed.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Growatt login request failed: {e}")))?;

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Growatt login response invalid: {e}")))?;

        if body.result != 1 {
            return Err(AppError::external_service(format!(
                "Growatt login rejected: {}",
                body.msg.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        let token = body
            .session_token
            .ok_or_else(|| AppError::external_service("Growatt login returned no session token"))?;

        info!("Growatt login succeeded");
        Ok(GrowattSession { token })
    }

    /// Fetches the plant list with generation metrics for the account.
    pub async fn plant_list(&self, session: &GrowattSession) -> Result<Vec<GrowattPlant>, AppError> {
        let url = format!("{}/newTwoPlantAPI.do", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("op", "getAllPlantListTwo"), ("sessionToken", &session.token)])
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Growatt plant list request failed: {e}"))
            })?;

        let body: PlantListResponse = response.json().await.map_err(|e| {
            AppError::external_service(format!("Growatt plant list response invalid: {e}"))
        })?;

        if body.result != 1 {
            return Err(AppError::external_service(format!(
                "Growatt plant list rejected: {}",
                body.msg.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        debug!(count = body.plants.len(), "Fetched Growatt plants");
        Ok(body.plants)
    }
}
