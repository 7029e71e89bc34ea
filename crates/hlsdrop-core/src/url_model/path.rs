//! File name extraction from URL path.

/// Extracts the last path segment from a URL for use as a local file name.
///
/// Returns `None` if the URL cannot be parsed, the path is empty/root, or the
/// path ends with a directory slash. The segment is returned as it appears
/// in the URL (percent-encoding is kept).
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
