use super::{status_error, Credentials, USER_AGENT};
use async_trait::async_trait;
use nexns_application::ports::DatasetSource;
use nexns_domain::config::ControllerConfig;
use nexns_domain::{DomainData, DomainError};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Fetches full and single-domain dumps from the controller.
pub struct ControllerClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl ControllerClient {
    pub fn new(config: &ControllerConfig) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .map_err(|e| DomainError::ControllerRequest(e.to_string()))?;

        Ok(Self {
            http,
            credentials: Credentials::from_config(config)?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let url = self.credentials.url(path);
        let response = self
            .credentials
            .get(&self.http, path)
            .send()
            .await
            .map_err(|e| DomainError::ControllerRequest(format!("GET {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(status_error(&response));
        }

        let body = response.bytes().await.map_err(|e| {
            DomainError::ControllerRequest(format!("Failed to read body of {}: {}", url, e))
        })?;
        debug!(url = %url, bytes = body.len(), "Controller response received");

        serde_json::from_slice(&body)
            .map_err(|e| DomainError::InvalidDataset(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl DatasetSource for ControllerClient {
    async fn fetch_all(&self) -> Result<Vec<DomainData>, DomainError> {
        self.get_json("api/v1/domain/dump/").await
    }

    async fn fetch_domain(&self, domain_id: i64) -> Result<DomainData, DomainError> {
        self.get_json(&format!("api/v1/domain/{}/dump/", domain_id))
            .await
    }
}
