use thiserror::Error;

/// Why a single upload attempt produced no asset.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status code {0}")]
    Status(u16),

    #[error("unsupported media type '{0}'")]
    UnsupportedMediaType(String),

    #[error("provider is not configured: {0}")]
    Config(String),
}

impl UploadError {
    /// Message shown to the user when this attempt fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedMediaType(_) => "Invalid file type",
            _ => "Upload failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(UploadError::Status(500).user_message(), "Upload failed");
        assert_eq!(
            UploadError::Config("missing cloud name".into()).user_message(),
            "Upload failed"
        );
        assert_eq!(
            UploadError::UnsupportedMediaType("text/plain".into()).user_message(),
            "Invalid file type"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            UploadError::Status(404).to_string(),
            "unexpected status code 404"
        );
        assert_eq!(
            UploadError::UnsupportedMediaType("application/pdf".into()).to_string(),
            "unsupported media type 'application/pdf'"
        );
    }
}
