//! Media host client.
//!
//! Files go straight from the attendee to the external host; the only
//! credential involved is the public unsigned-upload preset. The host
//! exposes one endpoint per media kind (image vs. video).

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use encore_core::models::{HostedMedia, MediaKind, SelectedFile};
use reqwest::multipart;
use reqwest::Client;

/// Seam for the external media host, so the pipeline can be exercised
/// without network access.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<HostedMedia>;
}

/// Cloudinary-style unsigned upload client.
#[derive(Clone, Debug)]
pub struct CloudinaryClient {
    client: Client,
    cloud_name: String,
    upload_preset: String,
}

impl CloudinaryClient {
    /// Connect timeout only; uploads near the video cap have no overall
    /// deadline.
    pub fn new(cloud_name: impl Into<String>, upload_preset: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
        })
    }

    pub fn from_config(config: &encore_core::ClientConfig) -> Result<Self> {
        Self::new(
            config.cloudinary_cloud_name.clone(),
            config.cloudinary_upload_preset.clone(),
        )
    }

    fn endpoint_for(&self, kind: MediaKind) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/{}/upload",
            self.cloud_name,
            kind.endpoint_segment()
        )
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, file: &SelectedFile) -> Result<HostedMedia> {
        let kind = file.kind().with_context(|| {
            format!(
                "Cannot upload {}: unsupported type {}",
                file.name, file.content_type
            )
        })?;

        let part = multipart::Part::bytes(file.data.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .with_context(|| format!("Invalid MIME type: {}", file.content_type))?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(self.endpoint_for(kind))
            .multipart(form)
            .send()
            .await
            .context("Failed to send upload request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Media host upload failed with status {}: {}", status, error_text);
        }

        // secure_url and public_id are opaque; everything else in the
        // response is ignored.
        let hosted: HostedMedia = response
            .json()
            .await
            .context("Failed to parse media host response")?;

        Ok(hosted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_selected_by_media_kind() {
        let client = CloudinaryClient::new("demo-cloud", "preset").unwrap();
        assert_eq!(
            client.endpoint_for(MediaKind::Image),
            "https://api.cloudinary.com/v1_1/demo-cloud/image/upload"
        );
        assert_eq!(
            client.endpoint_for(MediaKind::Video),
            "https://api.cloudinary.com/v1_1/demo-cloud/video/upload"
        );
    }

    #[test]
    fn hosted_media_ignores_extra_response_fields() {
        let raw = serde_json::json!({
            "secure_url": "https://res.example.com/v1/abc.jpg",
            "public_id": "abc",
            "bytes": 2048,
            "format": "jpg"
        });
        let hosted: HostedMedia = serde_json::from_value(raw).unwrap();
        assert_eq!(hosted.secure_url, "https://res.example.com/v1/abc.jpg");
        assert_eq!(hosted.public_id, "abc");
    }
}
