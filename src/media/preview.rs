use super::types::{PendingFile, ResourceKind};
use crate::utils::format_size;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::sync::Arc;
use tracing::warn;

/// Local preview of a pending file, derived without any network I/O.
#[derive(Debug, Default)]
pub struct FilePreview {
    source: Option<Arc<PendingFile>>,
    data_url: Option<String>,
}

impl FilePreview {
    /// Derives the preview for `file` unless it is the file already shown.
    pub async fn refresh(&mut self, file: &Arc<PendingFile>) {
        if let Some(source) = &self.source {
            if Arc::ptr_eq(source, file) {
                return;
            }
        }

        self.source = Some(Arc::clone(file));
        self.data_url = derive_data_url(Arc::clone(file)).await;
    }

    pub fn data_url(&self) -> Option<&str> {
        self.data_url.as_deref()
    }

    /// One line per pending file; `index` is what `remove` takes.
    pub fn render(&self, index: usize) -> String {
        let Some(file) = &self.source else {
            return format!("  [{index}] (empty)");
        };

        let shown = match (self.data_url(), file.kind()) {
            (Some(url), ResourceKind::Image) => format!("image preview, {} chars", url.len()),
            (Some(url), ResourceKind::Video) => format!("video preview, {} chars", url.len()),
            _ => "[file]".to_string(),
        };

        format!(
            "  [{index}] {} ({}, {}) {}  -- `remove {index}`",
            file.name,
            file.mime,
            format_size(file.size()),
            shown
        )
    }
}

/// Encodes image and video files as `data:` URLs; other types get no preview.
pub async fn derive_data_url(file: Arc<PendingFile>) -> Option<String> {
    if file.kind() == ResourceKind::Other {
        return None;
    }

    let name = file.name.clone();
    match tokio::task::spawn_blocking(move || {
        format!("data:{};base64,{}", file.mime, STANDARD.encode(&file.data))
    })
    .await
    {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Failed to build preview for {}: {}", name, e);
            None
        }
    }
}
