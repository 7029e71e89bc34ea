//! Per-run options for crawl and segment phases.

use std::path::PathBuf;

use crate::config::HlsdropConfig;
use crate::manifest::ManifestScanner;
use crate::url_model::DEFAULT_MANIFEST_NAME;

/// Everything a fetch run needs besides the request and the HTTP client.
///
/// Built explicitly by the caller for each run; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Directory manifests and segments are written into.
    pub save_dir: PathBuf,
    /// Local name for URLs without a usable path segment.
    pub default_manifest_name: String,
    pub scanner: ManifestScanner,
    /// Queue each manifest/segment URL at most once.
    pub dedup: bool,
    /// Upper bound on manifests fetched (guards against self-referencing playlists).
    pub max_manifests: usize,
    /// Concurrent segment downloads (1 = sequential).
    pub jobs: usize,
}

impl CrawlOptions {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            default_manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            scanner: ManifestScanner::default(),
            dedup: false,
            max_manifests: 10_000,
            jobs: 1,
        }
    }

    pub fn from_config(cfg: &HlsdropConfig) -> Self {
        Self {
            save_dir: cfg.save_directory.clone(),
            default_manifest_name: cfg.default_manifest_name.clone(),
            scanner: ManifestScanner::new(&cfg.manifest_suffix, &cfg.segment_suffix),
            dedup: cfg.dedup,
            max_manifests: cfg.max_manifests.max(1),
            jobs: cfg.jobs.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_clamps_zero_values() {
        let cfg = HlsdropConfig {
            jobs: 0,
            max_manifests: 0,
            ..HlsdropConfig::default()
        };
        let opts = CrawlOptions::from_config(&cfg);
        assert_eq!(opts.jobs, 1);
        assert_eq!(opts.max_manifests, 1);
        assert_eq!(opts.save_dir, PathBuf::from("downloads"));
        assert!(!opts.dedup);
    }
}
