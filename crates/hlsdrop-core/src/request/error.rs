//! Parse/validation errors for request descriptions. All of them are fatal to a run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// A header declaration without a `": "` separator between name and value.
    #[error("malformed header declaration: {0:?} (expected \"Name: Value\")")]
    MalformedHeader(String),
    #[error("no URL found in the request description")]
    MissingUrl,
    /// The URL path (query ignored) does not end with the manifest suffix.
    #[error("the URL does not point to a {suffix} file: {url}")]
    NotAManifest { url: String, suffix: String },
    #[error("read request description: {0}")]
    Read(#[from] std::io::Error),
}
