//! URL modeling and local file naming.
//!
//! Manifests and segments are saved flat into the save directory under the
//! last path segment of their URL.

mod path;

pub use path::filename_from_url_path;

use std::path::{Path, PathBuf};

/// Default file name when a manifest URL has no usable path segment.
pub const DEFAULT_MANIFEST_NAME: &str = "index.m3u8";

/// Local file name for `url`, or `fallback` when the URL path yields nothing.
pub fn local_file_name(url: &str, fallback: &str) -> String {
    filename_from_url_path(url).unwrap_or_else(|| fallback.to_string())
}

/// `<save_dir>/<basename-of-url>`.
pub fn local_path(save_dir: &Path, url: &str, fallback: &str) -> PathBuf {
    save_dir.join(local_file_name(url, fallback))
}
