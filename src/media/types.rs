use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

pub const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Video,
    Other,
}

impl ResourceKind {
    /// Classifies a declared MIME type by its top-level type.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else {
            Self::Other
        }
    }

    /// Classifies a provider-reported resource type ("image", "video", "raw", ...).
    pub fn from_resource_type(resource_type: &str) -> Self {
        match resource_type {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A locally selected file that has not been uploaded yet.
#[derive(Debug)]
pub struct PendingFile {
    pub name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data,
        }
    }

    /// Reads a file from disk, guessing its declared type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file {}", path.display()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME)
            .to_string();

        Ok(Self::new(name, mime, data))
    }

    pub fn kind(&self) -> ResourceKind {
        ResourceKind::from_mime(&self.mime)
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// An asset a provider accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAsset {
    pub url: String,
    pub kind: ResourceKind,
    pub upload_duration_seconds: f64,
    /// Provider-side identifier, set for storage API videos.
    pub asset_id: Option<String>,
    /// Two-decimal seconds from the last measurement; `None` if unavailable or never measured.
    pub measured_load_duration: Option<String>,
}

impl UploadedAsset {
    pub fn new(url: impl Into<String>, kind: ResourceKind, upload_duration_seconds: f64) -> Self {
        Self {
            url: url.into(),
            kind,
            upload_duration_seconds,
            asset_id: None,
            measured_load_duration: None,
        }
    }

    pub fn with_asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(ResourceKind::from_mime("image/png"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_mime("video/mp4"), ResourceKind::Video);
        assert_eq!(ResourceKind::from_mime("application/pdf"), ResourceKind::Other);
        assert_eq!(ResourceKind::from_mime(""), ResourceKind::Other);
        assert_eq!(ResourceKind::from_mime("imagex/png"), ResourceKind::Other);
    }

    #[test]
    fn test_kind_from_resource_type() {
        assert_eq!(ResourceKind::from_resource_type("image"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_resource_type("video"), ResourceKind::Video);
        assert_eq!(ResourceKind::from_resource_type("raw"), ResourceKind::Other);
    }

    #[tokio::test]
    async fn test_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, b"not really a video").await.unwrap();

        let file = PendingFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "clip.mp4");
        assert_eq!(file.mime, "video/mp4");
        assert_eq!(file.kind(), ResourceKind::Video);
        assert_eq!(file.size(), 18);
    }

    #[tokio::test]
    async fn test_from_path_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes");
        tokio::fs::write(&path, b"x").await.unwrap();

        let file = PendingFile::from_path(&path).await.unwrap();
        assert_eq!(file.mime, FALLBACK_MIME);
        assert_eq!(file.kind(), ResourceKind::Other);
    }

    #[tokio::test]
    async fn test_from_path_missing() {
        let result = PendingFile::from_path(Path::new("/nonexistent/a.png")).await;
        assert!(result.is_err());
    }
}
