//! Request extraction: turn a captured "Copy as cURL" string into a URL plus headers.
//!
//! The rest of the crate only depends on [`RequestSpec`]; it does not know
//! how the description was written.

mod error;
mod parse;

pub use error::ExtractError;

use std::collections::HashMap;
use std::io::BufRead;

/// Suffix a request URL must end with (query string ignored).
pub const MANIFEST_SUFFIX: &str = ".m3u8";

/// Minimal request specification needed to fetch a manifest tree.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    /// Headers sent verbatim on every outbound GET.
    pub headers: HashMap<String, String>,
}

/// Extracts headers and the manifest URL from a request description.
///
/// Fails without touching the network when a header declaration is malformed,
/// when no URL is present, or when the URL path does not end in
/// [`MANIFEST_SUFFIX`].
pub fn extract_request(description: &str) -> Result<RequestSpec, ExtractError> {
    extract_request_with_suffix(description, MANIFEST_SUFFIX)
}

/// Like [`extract_request`] with a caller-chosen manifest suffix.
pub fn extract_request_with_suffix(
    description: &str,
    manifest_suffix: &str,
) -> Result<RequestSpec, ExtractError> {
    let mut headers = HashMap::new();
    for (name, value) in parse::header_declarations(description)? {
        headers.insert(name, value);
    }
    if let Some(cookie) = parse::cookie_declaration(description) {
        headers.entry("Cookie".to_string()).or_insert(cookie);
    }

    let url = parse::request_url(description).ok_or(ExtractError::MissingUrl)?;
    validate_manifest_url(&url, manifest_suffix)?;

    tracing::debug!(url = %url, header_count = headers.len(), "extracted request");
    Ok(RequestSpec { url, headers })
}

/// Checks that `url`, stripped of its query string, ends with `suffix`.
pub fn validate_manifest_url(url: &str, suffix: &str) -> Result<(), ExtractError> {
    let path = url.split('?').next().unwrap_or(url);
    if path.ends_with(suffix) {
        Ok(())
    } else {
        Err(ExtractError::NotAManifest {
            url: url.to_string(),
            suffix: suffix.to_string(),
        })
    }
}

/// Reads one request description line, joining shell continuations (`\` at end of line).
pub fn read_request_description<R: BufRead>(reader: R) -> Result<String, ExtractError> {
    let mut out = String::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_end();
        match trimmed.strip_suffix('\\') {
            Some(head) => {
                out.push_str(head);
                out.push(' ');
            }
            None => {
                out.push_str(trimmed);
                break;
            }
        }
    }
    Ok(out.trim().to_string())
}
