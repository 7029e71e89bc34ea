//! HTTP GETs for manifests and segments.
//!
//! [`Fetcher`] is the seam the crawler and segment downloader depend on;
//! [`CurlFetcher`] implements it with libcurl. Each call runs on the current
//! thread; call from `spawn_blocking` when used from async code.

mod curl_fetcher;
mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use curl_fetcher::{CurlFetcher, CurlOptions};
pub use error::FetchError;

use std::collections::HashMap;
use std::path::Path;

/// Authenticated GETs used by the crawl and segment phases.
pub trait Fetcher: Sync {
    /// GETs `url` with `headers` and returns the body as text. Only status 200 is success.
    fn get_text(&self, url: &str, headers: &HashMap<String, String>) -> Result<String, FetchError>;

    /// GETs `url` with `headers`, streaming the body into `dest`. Returns bytes written.
    ///
    /// `dest` is only created when the response status is 200.
    fn download_to(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        dest: &Path,
    ) -> Result<u64, FetchError>;
}
