mod cdn;
mod error;
mod measure;
mod preview;
mod storage_api;
mod types;
mod uploader;

pub use cdn::CdnUploader;
pub use error::UploadError;
pub use measure::LoadTimer;
pub use preview::FilePreview;
pub use storage_api::{stream_embed_url, StorageApiUploader};
pub use types::{PendingFile, ResourceKind, UploadedAsset};
pub use uploader::Uploader;

use crate::config::Config;
use anyhow::{Context, Result};
use std::{fmt, str::FromStr, sync::Arc, time::Duration};
use tracing::info;

/// The two upload destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Cdn,
    Storage,
}

impl Provider {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Cdn => "Cloudinary",
            Self::Storage => "GCP",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cdn => f.write_str("cdn"),
            Self::Storage => f.write_str("storage"),
        }
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cdn" | "a" | "cloudinary" => Ok(Self::Cdn),
            "storage" | "b" | "gcp" => Ok(Self::Storage),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{}' (expected cdn or storage)",
                s
            )),
        }
    }
}

/// Everything the session needs to talk to the outside world.
pub struct MediaClients {
    pub cdn: Arc<dyn Uploader>,
    pub storage: Arc<dyn Uploader>,
    pub load_timer: LoadTimer,
}

impl MediaClients {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client(config.session.request_timeout())?;

        let cdn = CdnUploader::new(client.clone(), &config.cdn)?;
        let storage = StorageApiUploader::new(client.clone(), &config.storage)?;

        info!(
            "Media clients initialized - cdn preset '{}', storage at {}",
            config.cdn.upload_preset, config.storage.base_url
        );

        Ok(Self {
            cdn: Arc::new(cdn),
            storage: Arc::new(storage),
            load_timer: LoadTimer::new(client),
        })
    }

    pub fn uploader(&self, provider: Provider) -> Arc<dyn Uploader> {
        match provider {
            Provider::Cdn => Arc::clone(&self.cdn),
            Provider::Storage => Arc::clone(&self.storage),
        }
    }
}

/// Shared HTTP client; requests are unbounded unless a timeout is configured.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to create HTTP client")
}
