mod notify;
mod render;

pub use notify::{Notifier, TerminalNotifier};

use crate::config::Config;
use crate::media::{FilePreview, MediaClients, PendingFile, Provider, UploadedAsset};
use anyhow::{bail, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use std::{collections::HashSet, path::PathBuf, sync::Arc};
use tracing::{error, info, warn};

struct PendingEntry {
    file: Arc<PendingFile>,
    preview: FilePreview,
}

/// Per-batch counts, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub succeeded: usize,
}

/// The interactive upload session: pending files, both providers' uploaded
/// assets, and the flags that drive what is shown.
pub struct UploadSession {
    clients: MediaClients,
    notifier: Arc<dyn Notifier>,
    stream_base_url: String,
    retain_failed_uploads: bool,
    pending: Vec<PendingEntry>,
    cdn_assets: Vec<UploadedAsset>,
    storage_assets: Vec<UploadedAsset>,
    uploading: bool,
    show_cdn: bool,
    show_storage: bool,
}

impl UploadSession {
    pub fn new(clients: MediaClients, notifier: Arc<dyn Notifier>, config: &Config) -> Self {
        Self {
            clients,
            notifier,
            stream_base_url: config.storage.stream_base_url.clone(),
            retain_failed_uploads: config.session.retain_failed_uploads,
            pending: Vec::new(),
            cdn_assets: Vec::new(),
            storage_assets: Vec::new(),
            uploading: false,
            show_cdn: false,
            show_storage: false,
        }
    }

    /// Appends files to the pending list and derives their previews.
    pub async fn select_files(&mut self, files: Vec<PendingFile>) {
        for file in files {
            let file = Arc::new(file);
            let mut preview = FilePreview::default();
            preview.refresh(&file).await;
            self.pending.push(PendingEntry { file, preview });
        }
    }

    /// Reads and selects each path; unreadable paths are reported and skipped.
    pub async fn add_paths(&mut self, paths: &[PathBuf]) -> usize {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match PendingFile::from_path(path).await {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("Skipping {}: {:#}", path.display(), e);
                    self.notifier
                        .alert(&format!("Could not read {}", path.display()));
                }
            }
        }

        let added = files.len();
        self.select_files(files).await;
        added
    }

    /// Removes the pending file at `index`; out-of-range indexes are ignored.
    pub fn remove_pending(&mut self, index: usize) -> bool {
        if index >= self.pending.len() {
            return false;
        }
        self.pending.remove(index);
        true
    }

    /// Uploads every pending file to `provider` concurrently.
    ///
    /// Each file succeeds or fails on its own; failures alert the user and the
    /// batch carries on. Once every upload has settled the pending list is
    /// cleared, keeping failed files only when `retain_failed_uploads` is set.
    pub async fn submit(&mut self, provider: Provider) -> Result<BatchOutcome> {
        if self.uploading {
            bail!("An upload batch is already running");
        }
        if self.pending.is_empty() {
            return Ok(BatchOutcome::default());
        }

        self.uploading = true;
        self.show_cdn = false;
        self.show_storage = false;

        let uploader = self.clients.uploader(provider);
        info!(
            "Uploading {} file(s) to {}",
            self.pending.len(),
            uploader.name()
        );

        let mut in_flight: FuturesUnordered<_> = self
            .pending
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let uploader = Arc::clone(&uploader);
                let file = Arc::clone(&entry.file);
                async move { (index, uploader.upload(&file).await) }
            })
            .collect();

        let mut outcome = BatchOutcome {
            attempted: self.pending.len(),
            succeeded: 0,
        };
        let mut failed = HashSet::new();

        while let Some((index, result)) = in_flight.next().await {
            match result {
                Ok(asset) => {
                    outcome.succeeded += 1;
                    self.assets_mut(provider).push(asset);
                }
                Err(e) => {
                    error!(
                        "Upload of {} to {} failed: {}",
                        self.pending[index].file.name, provider, e
                    );
                    self.notifier.alert(e.user_message());
                    failed.insert(index);
                }
            }
        }
        drop(in_flight);

        if self.retain_failed_uploads {
            let mut index = 0;
            self.pending.retain(|_| {
                let keep = failed.contains(&index);
                index += 1;
                keep
            });
        } else {
            self.pending.clear();
        }
        self.uploading = false;

        info!(
            "Upload batch to {} finished: {}/{} succeeded",
            provider, outcome.succeeded, outcome.attempted
        );
        Ok(outcome)
    }

    /// Re-measures load time for every asset of `provider`, then flips its visibility.
    pub async fn toggle_show(&mut self, provider: Provider) {
        if self.uploading {
            return;
        }

        let timer = &self.clients.load_timer;
        let assets = match provider {
            Provider::Cdn => &mut self.cdn_assets,
            Provider::Storage => &mut self.storage_assets,
        };
        timer.measure_all(assets).await;

        let visible = self.visible_mut(provider);
        *visible = !*visible;
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_visible(&self, provider: Provider) -> bool {
        match provider {
            Provider::Cdn => self.show_cdn,
            Provider::Storage => self.show_storage,
        }
    }

    pub fn pending_names(&self) -> Vec<&str> {
        self.pending.iter().map(|e| e.file.name.as_str()).collect()
    }

    pub fn assets(&self, provider: Provider) -> &[UploadedAsset] {
        match provider {
            Provider::Cdn => &self.cdn_assets,
            Provider::Storage => &self.storage_assets,
        }
    }

    fn assets_mut(&mut self, provider: Provider) -> &mut Vec<UploadedAsset> {
        match provider {
            Provider::Cdn => &mut self.cdn_assets,
            Provider::Storage => &mut self.storage_assets,
        }
    }

    fn visible_mut(&mut self, provider: Provider) -> &mut bool {
        match provider {
            Provider::Cdn => &mut self.show_cdn,
            Provider::Storage => &mut self.show_storage,
        }
    }
}
