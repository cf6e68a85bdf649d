use super::UploadSession;
use crate::media::{stream_embed_url, Provider, ResourceKind, UploadedAsset};
use crate::utils::format_millis;
use std::fmt::Write;

impl UploadSession {
    /// Text rendering of the whole session.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== File Manager ===");
        let _ = writeln!(out);

        let _ = writeln!(out, "Pending files ({}):", self.pending.len());
        for (index, entry) in self.pending.iter().enumerate() {
            let _ = writeln!(out, "{}", entry.preview.render(index));
        }

        let _ = writeln!(out);
        for provider in [Provider::Cdn, Provider::Storage] {
            let _ = writeln!(out, "{}", self.submit_label(provider));
        }

        for provider in [Provider::Cdn, Provider::Storage] {
            let _ = writeln!(out);
            let _ = writeln!(out, "--- Files in {} ---", provider.title());
            let _ = writeln!(out, "(`show {provider}` to toggle)");
            if !self.is_visible(provider) {
                continue;
            }
            for (index, asset) in self.assets(provider).iter().enumerate() {
                self.render_asset(&mut out, provider, index, asset);
            }
        }

        out
    }

    fn submit_label(&self, provider: Provider) -> String {
        let label = if self.is_uploading() {
            "Uploading...".to_string()
        } else {
            format!("Upload Files to {}", provider.title())
        };

        if self.pending.is_empty() || self.is_uploading() {
            format!("[ {label} ] (disabled)")
        } else {
            format!("[ {label} ] `upload {provider}`")
        }
    }

    fn render_asset(
        &self,
        out: &mut String,
        provider: Provider,
        index: usize,
        asset: &UploadedAsset,
    ) {
        let shown = match (provider, asset.kind, asset.asset_id.as_deref()) {
            (Provider::Storage, ResourceKind::Video, Some(video_id)) => {
                let player = stream_embed_url(&self.stream_base_url, video_id);
                format!("video player {player}")
            }
            (_, ResourceKind::Image, _) => format!("image {}", asset.url),
            (_, ResourceKind::Video, _) => format!("video {}", asset.url),
            (_, ResourceKind::Other, _) => format!("[file] {}", asset.url),
        };

        let load_time = match &asset.measured_load_duration {
            Some(seconds) => format!("{seconds} seconds"),
            None => "N/A".to_string(),
        };

        let _ = writeln!(out, "  [{index}] {shown}");
        let _ = writeln!(out, "      Load Time: {load_time}");
        let _ = writeln!(
            out,
            "      Upload Time: {} seconds",
            format_millis(asset.upload_duration_seconds)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::notify::testing::RecordingNotifier;
    use super::*;
    use crate::config::Config;
    use crate::media::{MediaClients, PendingFile};
    use std::sync::Arc;

    fn session() -> UploadSession {
        let config = Config::default();
        let clients = MediaClients::from_config(&config).unwrap();
        UploadSession::new(clients, Arc::new(RecordingNotifier::default()), &config)
    }

    #[test]
    fn test_render_empty_session() {
        let out = session().render();

        assert!(out.contains("Pending files (0):"));
        assert!(out.contains("[ Upload Files to Cloudinary ] (disabled)"));
        assert!(out.contains("[ Upload Files to GCP ] (disabled)"));
        assert!(out.contains("--- Files in Cloudinary ---"));
        assert!(out.contains("--- Files in GCP ---"));
    }

    #[tokio::test]
    async fn test_render_pending_enables_submit() {
        let mut session = session();
        session
            .select_files(vec![PendingFile::new("a.png", "image/png", vec![1, 2])])
            .await;

        let out = session.render();
        assert!(out.contains("a.png (image/png, 2 B)"));
        assert!(out.contains("`upload cdn`"));
        assert!(out.contains("`upload storage`"));
    }

    #[test]
    fn test_render_visible_assets() {
        let mut session = session();
        let mut image = UploadedAsset::new("https://img/a.png", ResourceKind::Image, 1.5);
        image.measured_load_duration = Some("0.42".to_string());
        session.cdn_assets.push(image);
        session.storage_assets.push(
            UploadedAsset::new("https://stream/v1", ResourceKind::Video, 2.0).with_asset_id("v1"),
        );
        session.show_cdn = true;
        session.show_storage = true;

        let out = session.render();
        assert!(out.contains("image https://img/a.png"));
        assert!(out.contains("Load Time: 0.42 seconds"));
        assert!(out.contains("Upload Time: 1.500 seconds"));
        assert!(out.contains(
            "video player https://customer-2n06osd9scxq0n66.cloudflarestream.com/v1/iframe"
        ));
        assert!(out.contains("Load Time: N/A"));
    }

    #[test]
    fn test_render_upload_time_at_millisecond_precision() {
        let mut session = session();
        session
            .cdn_assets
            .push(UploadedAsset::new("https://img/a.png", ResourceKind::Image, 0.123456789));
        session.show_cdn = true;

        let out = session.render();
        assert!(out.contains("Upload Time: 0.123 seconds"));
        assert!(!out.contains("0.1234"));
    }

    #[tokio::test]
    async fn test_render_while_uploading_disables_submit() {
        let mut session = session();
        session
            .select_files(vec![PendingFile::new("a.png", "image/png", vec![1])])
            .await;
        session.uploading = true;

        let out = session.render();
        assert!(out.contains("[ Uploading... ] (disabled)"));
        assert!(!out.contains("`upload cdn`"));
    }

    #[test]
    fn test_render_hidden_assets() {
        let mut session = session();
        session
            .cdn_assets
            .push(UploadedAsset::new("https://img/a.png", ResourceKind::Image, 1.0));

        assert!(!session.render().contains("https://img/a.png"));
    }
}
