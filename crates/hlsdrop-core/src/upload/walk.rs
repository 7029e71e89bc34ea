//! Directory walk and object key derivation.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::UploadError;

/// A regular file found under the source root, with the key it will be stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub key: String,
}

/// Object key for `path` relative to `root`: path components joined with `/`,
/// optionally under `prefix`.
///
/// Returns `None` when `path` is not under `root`.
pub fn object_key(root: &Path, path: &Path, prefix: Option<&str>) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    let key = parts.join("/");
    match prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(p) => Some(format!("{}/{}", p, key)),
        None => Some(key),
    }
}

/// Recursively lists regular files under `root`, sorted by key.
///
/// Symlinked directories are not followed. An unreadable subdirectory is
/// logged and skipped; an unreadable root is an error.
pub fn collect_files(root: &Path, prefix: Option<&str>) -> Result<Vec<LocalFile>, UploadError> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(source) if dir == root => {
                return Err(UploadError::Walk { path: dir, source });
            }
            Err(e) => {
                tracing::warn!("skipping unreadable directory {}: {}", dir.display(), e);
                continue;
            }
        };
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
                if let Some(key) = object_key(root, &path, prefix) {
                    files.push(LocalFile { path, key });
                }
            }
        }
    }

    files.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(files)
}
