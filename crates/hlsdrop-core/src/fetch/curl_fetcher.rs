//! libcurl-backed [`Fetcher`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use super::{FetchError, Fetcher};
use crate::storage;

/// Transfer options applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: CurlOptions,
}

impl CurlFetcher {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }

    fn easy(&self, url: &str, headers: &HashMap<String, String>) -> Result<curl::easy::Easy, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        // Decode gzip/deflate bodies; captured requests usually carry Accept-Encoding.
        easy.accept_encoding("")?;

        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !headers.is_empty() {
            easy.http_headers(list)?;
        }
        Ok(easy)
    }

    /// Runs the GET, writing the body to `file`. Returns bytes written.
    fn stream_into(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        file: &mut File,
    ) -> Result<u64, FetchError> {
        let mut easy = self.easy(url, headers)?;
        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(FetchError::Io(e));
        }
        performed?;

        let code = easy.response_code()?;
        if code != 200 {
            return Err(FetchError::Http(code));
        }
        file.flush()?;
        Ok(written)
    }
}

impl Fetcher for CurlFetcher {
    fn get_text(&self, url: &str, headers: &HashMap<String, String>) -> Result<String, FetchError> {
        let mut easy = self.easy(url, headers)?;
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if code != 200 {
            return Err(FetchError::Http(code));
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn download_to(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        dest: &Path,
    ) -> Result<u64, FetchError> {
        let mut temp = storage::create_temp(dest)?;
        // An early return drops `temp`, which removes the partial file.
        let n = self.stream_into(url, headers, temp.as_file_mut())?;
        storage::finalize(temp, dest)?;
        Ok(n)
    }
}
