use super::types::{ResourceKind, UploadedAsset};
use crate::utils::format_seconds;
use anyhow::{anyhow, Result};
use futures::future::join_all;
use std::time::{Duration, Instant};
use tracing::debug;

/// Times how long an uploaded asset takes to become usable from this client.
///
/// Images count as ready once the whole body has arrived; videos as soon as the
/// first chunk of data does. Results depend on network and caches and are not
/// corrected for either.
pub struct LoadTimer {
    client: reqwest::Client,
}

impl LoadTimer {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Two-decimal seconds, or `None` when the asset could not be loaded.
    pub async fn measure(&self, asset: &UploadedAsset) -> Option<String> {
        let result = match asset.kind {
            ResourceKind::Image => self.time_full_body(&asset.url).await,
            ResourceKind::Video => self.time_first_chunk(&asset.url).await,
            ResourceKind::Other => return None,
        };

        match result {
            Ok(elapsed) => Some(format_seconds(elapsed)),
            Err(e) => {
                debug!("Load time unavailable for {}: {}", asset.url, e);
                None
            }
        }
    }

    /// Re-measures every asset concurrently, overwriting previous results.
    pub async fn measure_all(&self, assets: &mut [UploadedAsset]) {
        let measurements = join_all(assets.iter().map(|asset| self.measure(asset))).await;

        for (asset, measured) in assets.iter_mut().zip(measurements) {
            asset.measured_load_duration = measured;
        }
    }

    async fn time_full_body(&self, url: &str) -> Result<Duration> {
        let started = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.bytes().await?;
        Ok(started.elapsed())
    }

    async fn time_first_chunk(&self, url: &str) -> Result<Duration> {
        let started = Instant::now();
        let mut response = self.client.get(url).send().await?.error_for_status()?;
        match response.chunk().await? {
            Some(_) => Ok(started.elapsed()),
            None => Err(anyhow!("empty response body")),
        }
    }
}
