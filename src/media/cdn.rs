use super::{
    error::UploadError,
    types::{PendingFile, ResourceKind, UploadedAsset},
    uploader::{file_part, Uploader},
};
use crate::config::CdnConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{multipart::Form, StatusCode};
use serde::Deserialize;
use std::time::Instant;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
struct CdnUploadResponse {
    url: String,
    resource_type: String,
}

/// Uploads any file to the media CDN's auto-detecting endpoint.
pub struct CdnUploader {
    client: reqwest::Client,
    endpoint: Option<Url>,
    upload_preset: String,
}

impl CdnUploader {
    pub fn new(client: reqwest::Client, config: &CdnConfig) -> Result<Self> {
        let cloud_name = config
            .cloud_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let endpoint = match cloud_name {
            Some(cloud_name) => Some(
                Url::parse(&format!(
                    "{}/v1_1/{}/auto/upload",
                    config.base_url.trim_end_matches('/'),
                    cloud_name
                ))
                .with_context(|| format!("Invalid CDN base URL {}", config.base_url))?,
            ),
            None => None,
        };

        Ok(Self {
            client,
            endpoint,
            upload_preset: config.upload_preset.clone(),
        })
    }
}

#[async_trait]
impl Uploader for CdnUploader {
    fn name(&self) -> &'static str {
        "cdn"
    }

    async fn upload(&self, file: &PendingFile) -> Result<UploadedAsset, UploadError> {
        let endpoint = self
            .endpoint
            .clone()
            .ok_or_else(|| UploadError::Config("cloud name is not set".to_string()))?;

        let form = Form::new()
            .part("file", file_part(file))
            .text("upload_preset", self.upload_preset.clone());

        debug!("Uploading {} to {}", file.name, endpoint);
        let started = Instant::now();

        let response = self.client.post(endpoint).multipart(form).send().await?;
        if response.status() != StatusCode::OK {
            return Err(UploadError::Status(response.status().as_u16()));
        }

        let body: CdnUploadResponse = response.json().await?;
        let elapsed = started.elapsed().as_secs_f64();

        Ok(UploadedAsset::new(
            body.url,
            ResourceKind::from_resource_type(&body.resource_type),
            elapsed,
        ))
    }
}
