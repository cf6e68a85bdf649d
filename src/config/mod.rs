use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CLOUD_NAME_ENV: &str = "CLOUDINARY_CLOUD_NAME";
pub const CONFIG_PATH_ENV: &str = "DROPZONE_CONFIG";

/// Finds the config file: the `--config` flag, then `DROPZONE_CONFIG`, then
/// `$XDG_CONFIG_HOME/dropzone/config.toml`, then `~/.config/dropzone/config.toml`.
pub fn find_config_path(cli_path: Option<&str>) -> Option<String> {
    resolve_config_path(
        cli_path,
        std::env::var(CONFIG_PATH_ENV).ok(),
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
    )
}

fn resolve_config_path(
    cli_path: Option<&str>,
    env_path: Option<String>,
    xdg_config_home: Option<String>,
    home: Option<PathBuf>,
) -> Option<String> {
    if let Some(path) = cli_path {
        return Some(path.to_string());
    }

    if let Some(path) = env_path {
        return Some(path);
    }

    if let Some(xdg_config_home) = xdg_config_home {
        let config_path = format!("{}/dropzone/config.toml", xdg_config_home);
        if Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = home {
        let config_path = format!("{}/.config/dropzone/config.toml", home.display());
        if Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    None
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "pretty".to_string(),
        }
    }
}

/// Media CDN account settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CdnConfig {
    pub cloud_name: Option<String>,
    pub base_url: String,
    pub upload_preset: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            base_url: "https://api.cloudinary.com".to_string(),
            upload_preset: "testing".to_string(),
        }
    }
}

/// Custom image/video storage API settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub base_url: String,
    pub stream_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            stream_base_url: "https://customer-2n06osd9scxq0n66.cloudflarestream.com".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Keep files whose upload failed in the pending list after a batch.
    pub retain_failed_uploads: bool,
    pub request_timeout_secs: Option<u64>,
}

impl SessionConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub cdn: CdnConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file {}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Applies environment overrides on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        let cloud_name = std::env::var(CLOUD_NAME_ENV).ok();
        self.with_cloud_name_override(cloud_name)
    }

    fn with_cloud_name_override(mut self, cloud_name: Option<String>) -> Self {
        if let Some(cloud_name) = cloud_name {
            if !cloud_name.trim().is_empty() {
                self.cdn.cloud_name = Some(cloud_name);
            }
        }
        self
    }

    pub fn get_logging_format(&self) -> &str {
        &self.logging.format
    }
}
