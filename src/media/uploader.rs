use super::{
    error::UploadError,
    types::{PendingFile, UploadedAsset},
};
use async_trait::async_trait;
use reqwest::multipart::Part;

#[async_trait]
pub trait Uploader: Send + Sync {
    /// Human-readable name of the provider
    fn name(&self) -> &'static str;

    /// Upload one file and describe the asset the provider created
    async fn upload(&self, file: &PendingFile) -> Result<UploadedAsset, UploadError>;
}

/// Builds the multipart part carrying a file's raw bytes, name and declared type.
pub(crate) fn file_part(file: &PendingFile) -> Part {
    let untyped = || Part::bytes(file.data.clone()).file_name(file.name.clone());

    // mime_str drops the part on a parse error, so check the type first
    if file.mime.parse::<mime_guess::mime::Mime>().is_err() {
        return untyped();
    }

    untyped().mime_str(&file.mime).unwrap_or_else(|_| untyped())
}
