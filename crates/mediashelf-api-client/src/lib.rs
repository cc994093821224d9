//! HTTP client for the mediashelf file service.
//!
//! Provides a minimal client with generic GET / multipart POST / DELETE
//! helpers and the domain methods (list, upload, delete, fetch) in [`api`].
//! The client implements `RemoteFileService` so the session can drive it
//! without knowing about HTTP.

pub mod api;

use mediashelf_core::{AppError, AppResult, ClientConfig};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Path prefix of the file service endpoints
pub const API_PREFIX: &str = "/api";

/// HTTP client for the file service
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::InvalidInput(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and turn transport failures and non-success statuses
    /// into `AppError`.
    async fn send_checked(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        Ok(response)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.build_url(path);
        let response = self.send_checked(self.client.get(&url)).await?;

        response
            .json()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    /// POST multipart form. Any 2xx counts as success; the body is ignored.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> AppResult<()> {
        let url = self.build_url(path);
        self.send_checked(self.client.post(&url).multipart(form))
            .await?;
        Ok(())
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.build_url(path);
        self.send_checked(self.client.delete(&url)).await?;
        Ok(())
    }

    /// GET an absolute URL and return the raw body
    pub async fn get_bytes(&self, url: &str) -> AppResult<bytes::Bytes> {
        let response = self.send_checked(self.client.get(url)).await?;

        response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))
    }
}
