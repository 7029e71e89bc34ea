use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Bucket upload settings (optional section in config.toml).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Key prefix prepended to every uploaded object (e.g. "videos/2024").
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Bucket region. Falls back to `AWS_REGION`, then "us-east-1".
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, R2, Spaces...).
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Global configuration loaded from `~/.config/hlsdrop/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HlsdropConfig {
    /// Directory manifests and segments are saved into.
    pub save_directory: PathBuf,
    /// Suffix marking a nested manifest reference.
    pub manifest_suffix: String,
    /// Suffix marking a segment reference.
    pub segment_suffix: String,
    /// File name used when a manifest URL has no usable path segment.
    pub default_manifest_name: String,
    /// Queue each manifest/segment URL at most once.
    #[serde(default)]
    pub dedup: bool,
    /// Upper bound on manifests fetched by one crawl.
    pub max_manifests: usize,
    /// Concurrent segment downloads / uploads.
    pub jobs: usize,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    #[serde(default)]
    pub upload: Option<UploadConfig>,
}

impl Default for HlsdropConfig {
    fn default() -> Self {
        Self {
            save_directory: PathBuf::from("downloads"),
            manifest_suffix: ".m3u8".to_string(),
            segment_suffix: ".ts".to_string(),
            default_manifest_name: "index.m3u8".to_string(),
            dedup: false,
            max_manifests: 10_000,
            jobs: 1,
            connect_timeout_secs: 30,
            timeout_secs: 3600,
            upload: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsdrop")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HlsdropConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HlsdropConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HlsdropConfig = toml::from_str(&data)?;
    Ok(cfg)
}
