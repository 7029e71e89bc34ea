//! In-memory [`Fetcher`] for unit tests.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use super::{FetchError, Fetcher};
use crate::storage;

/// Serves canned `(status, body)` pairs by URL and records every request.
#[derive(Default)]
pub(crate) struct MapFetcher {
    responses: HashMap<String, (u32, Vec<u8>)>,
    calls: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl MapFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, status: u32, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), (status, body.as_bytes().to_vec()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, HashMap<String, String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(u, _)| u).collect()
    }

    fn respond(&self, url: &str, headers: &HashMap<String, String>) -> Result<Vec<u8>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), headers.clone()));
        match self.responses.get(url) {
            Some((200, body)) => Ok(body.clone()),
            Some((status, _)) => Err(FetchError::Http(*status)),
            None => Err(FetchError::Http(404)),
        }
    }
}

impl Fetcher for MapFetcher {
    fn get_text(&self, url: &str, headers: &HashMap<String, String>) -> Result<String, FetchError> {
        let body = self.respond(url, headers)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn download_to(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        dest: &Path,
    ) -> Result<u64, FetchError> {
        let body = self.respond(url, headers)?;
        let mut temp = storage::create_temp(dest)?;
        temp.write_all(&body)?;
        storage::finalize(temp, dest)?;
        Ok(body.len() as u64)
    }
}
