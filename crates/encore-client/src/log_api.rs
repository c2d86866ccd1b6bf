//! Client for the upload-log endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use encore_core::models::{LogUploadRequest, LogUploadResponse};
use reqwest::Client;

/// Seam for the metadata-logging call, so the pipeline can be exercised
/// without a running API.
#[async_trait]
pub trait UploadSink: Send + Sync {
    async fn log_upload(&self, request: &LogUploadRequest) -> Result<LogUploadResponse>;
}

/// HTTP client for `POST {base}/api/log-upload`.
#[derive(Clone, Debug)]
pub struct LogApiClient {
    client: Client,
    base_url: String,
}

impl LogApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &encore_core::ClientConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl UploadSink for LogApiClient {
    async fn log_upload(&self, request: &LogUploadRequest) -> Result<LogUploadResponse> {
        let url = format!("{}/api/log-upload", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Upload logging failed with status {}: {}", status, error_text);
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let client = LogApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
