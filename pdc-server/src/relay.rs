//! Image upload relay
//!
//! Forwards image payloads to the external hosting service with a fixed
//! transformation profile and hands the resulting public URL back to the
//! caller. Pass-through only: no retries, no local image processing; a host
//! or network failure is reported once as an upstream error.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};
use pdc_common::config::ImageHostConfig;

/// Timeout for upload requests to the image host
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transformation bounds: fit within 800x600, aspect preserved, never upscale
const MAX_WIDTH: u32 = 800;
const MAX_HEIGHT: u32 = 600;
const QUALITY: &str = "auto:good";

/// Upload response from the image host
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Client for the external image hosting service
pub struct ImageHostClient {
    http_client: Client,
    config: ImageHostConfig,
}

impl ImageHostClient {
    pub fn new(config: ImageHostConfig) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    /// Upload one image and return its durable public URL
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        file_name: &str,
    ) -> Result<String> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| Error::BadRequest(format!("invalid image content type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("folder", self.config.folder.clone())
            .text(
                "transformation",
                format!("c_limit,w_{},h_{},q_{}", MAX_WIDTH, MAX_HEIGHT, QUALITY),
            );

        let mut request = self
            .http_client
            .post(&self.config.upload_url)
            .multipart(form);
        if !self.config.api_key.is_empty() {
            request = request.header("X-Api-Key", &self.config.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("image host request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!("image host returned {}", status)));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("invalid image host response: {}", e)))?;

        debug!("Image stored at {}", body.secure_url);
        Ok(body.secure_url)
    }
}
