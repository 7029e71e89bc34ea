//! Local file lifecycle for saved manifests and segments.
//!
//! Segments stream into a uniquely named `.part` temp file next to their
//! final path, which is renamed into place only after a successful response.
//! A failed GET never leaves a truncated file under the final name, and two
//! transfers targeting the same name never share a temp file; the last one
//! to finish wins.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

/// Suffix of in-flight temp files.
pub const TEMP_SUFFIX: &str = ".part";

/// Creates the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Creates a fresh temp file beside `final_path`, e.g. `.seg0.ts.a1B2c3.part`.
///
/// The file is removed when the handle is dropped without [`finalize`].
pub fn create_temp(final_path: &Path) -> io::Result<NamedTempFile> {
    ensure_parent_dir(final_path)?;
    let dir = match final_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut prefix = std::ffi::OsString::from(".");
    if let Some(name) = final_path.file_name() {
        prefix.push(name);
        prefix.push(".");
    }
    tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
}

/// Writes a manifest body verbatim as UTF-8, creating parent directories.
pub fn save_text(path: &Path, content: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content)
}

/// Moves a completed temp file to its final name, replacing any previous file.
pub fn finalize(temp: NamedTempFile, final_path: &Path) -> io::Result<()> {
    temp.persist(final_path).map(|_| ()).map_err(|e| e.error)
}
