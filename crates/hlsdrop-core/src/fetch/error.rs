//! Per-resource fetch error. Recoverable: the caller logs it and moves to the next URL.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Response status other than 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// Curl reported an error (DNS, connection, timeout, TLS...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Local write failed (disk full, permission denied...).
    #[error("storage: {0}")]
    Io(#[from] std::io::Error),
}
