use super::{
    error::UploadError,
    types::{PendingFile, ResourceKind, UploadedAsset},
    uploader::{file_part, Uploader},
};
use crate::config::StorageConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{multipart::Form, StatusCode};
use serde::Deserialize;
use std::time::Instant;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageUploadResponse {
    image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoUploadResponse {
    video_id: String,
    playback_url: String,
}

/// Uploads images and videos to the storage API's dedicated endpoints.
pub struct StorageApiUploader {
    client: reqwest::Client,
    image_endpoint: Url,
    video_endpoint: Url,
}

impl StorageApiUploader {
    pub fn new(client: reqwest::Client, config: &StorageConfig) -> Result<Self> {
        let base = config.base_url.trim_end_matches('/');
        let image_endpoint = Url::parse(&format!("{}/v1/storage/upload-image", base))
            .with_context(|| format!("Invalid storage base URL {}", config.base_url))?;
        let video_endpoint = Url::parse(&format!("{}/v1/storage/upload-video", base))
            .with_context(|| format!("Invalid storage base URL {}", config.base_url))?;

        Ok(Self {
            client,
            image_endpoint,
            video_endpoint,
        })
    }

    async fn post(
        &self,
        endpoint: &Url,
        field: &str,
        file: &PendingFile,
    ) -> Result<reqwest::Response, UploadError> {
        let form = Form::new().part(field.to_string(), file_part(file));

        debug!("Uploading {} to {}", file.name, endpoint);
        let response = self
            .client
            .post(endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(UploadError::Status(response.status().as_u16()));
        }

        Ok(response)
    }

    async fn upload_image(&self, file: &PendingFile) -> Result<UploadedAsset, UploadError> {
        let started = Instant::now();
        let response = self.post(&self.image_endpoint, "image", file).await?;
        let body: ImageUploadResponse = response.json().await?;

        Ok(UploadedAsset::new(
            body.image_url,
            ResourceKind::Image,
            started.elapsed().as_secs_f64(),
        ))
    }

    async fn upload_video(&self, file: &PendingFile) -> Result<UploadedAsset, UploadError> {
        let started = Instant::now();
        let response = self.post(&self.video_endpoint, "video", file).await?;
        let body: VideoUploadResponse = response.json().await?;

        Ok(UploadedAsset::new(
            body.playback_url,
            ResourceKind::Video,
            started.elapsed().as_secs_f64(),
        )
        .with_asset_id(body.video_id))
    }
}

#[async_trait]
impl Uploader for StorageApiUploader {
    fn name(&self) -> &'static str {
        "storage"
    }

    async fn upload(&self, file: &PendingFile) -> Result<UploadedAsset, UploadError> {
        match file.kind() {
            ResourceKind::Image => self.upload_image(file).await,
            ResourceKind::Video => self.upload_video(file).await,
            ResourceKind::Other => Err(UploadError::UnsupportedMediaType(file.mime.clone())),
        }
    }
}

/// Embedded player address for a stored video.
pub fn stream_embed_url(stream_base_url: &str, video_id: &str) -> String {
    format!("{}/{}/iframe", stream_base_url.trim_end_matches('/'), video_id)
}
