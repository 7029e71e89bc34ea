//! Manifest crawl: fetch the root manifest, follow nested manifests transitively,
//! collect segment URLs, then hand the segments to the downloader.
//!
//! Discovery and download are separate phases: segments are leaves and are
//! only fetched once the whole manifest graph is known.

mod options;
mod report;

pub use options::CrawlOptions;
pub use report::{
    CrawlReport, EventSink, FetchEvent, FetchReport, ResourceFailure, SavedSegment, SegmentReport,
};

use std::collections::HashSet;

use crate::fetch::{FetchError, Fetcher};
use crate::request::RequestSpec;
use crate::segments;
use crate::storage;
use crate::url_model;

/// Admits URLs into a queue; with de-duplication on, each URL is admitted once.
struct Admission {
    dedup: bool,
    seen: HashSet<String>,
}

impl Admission {
    fn new(dedup: bool) -> Self {
        Self {
            dedup,
            seen: HashSet::new(),
        }
    }

    fn admit(&mut self, url: &str) -> bool {
        !self.dedup || self.seen.insert(url.to_string())
    }
}

/// Runs the discovery phase and returns saved manifests, failures and segment URLs.
///
/// A manifest that fails to fetch or save is recorded and skipped; the rest
/// of the queue is still processed.
pub fn crawl_manifests(
    request: &RequestSpec,
    fetcher: &dyn Fetcher,
    opts: &CrawlOptions,
    events: Option<EventSink<'_>>,
) -> CrawlReport {
    let mut report = CrawlReport::default();
    let mut manifests: Vec<String> = vec![request.url.clone()];
    let mut manifest_admission = Admission::new(opts.dedup);
    let mut segment_admission = Admission::new(opts.dedup);
    manifest_admission.admit(&request.url);

    let mut next = 0;
    while next < manifests.len() {
        let url = manifests[next].clone();
        next += 1;

        let body = match fetcher.get_text(&url, &request.headers) {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(url = %url, error = %error, "manifest fetch failed");
                record_manifest_failure(&mut report, url, error, events);
                continue;
            }
        };

        let path = url_model::local_path(&opts.save_dir, &url, &opts.default_manifest_name);
        if let Err(e) = storage::save_text(&path, &body) {
            tracing::warn!(url = %url, path = %path.display(), error = %e, "manifest save failed");
            record_manifest_failure(&mut report, url, FetchError::Io(e), events);
            continue;
        }
        tracing::info!(url = %url, path = %path.display(), "saved manifest");
        if let Some(sink) = events {
            sink(&FetchEvent::ManifestSaved { url: &url, path: &path });
        }

        let found = opts.scanner.scan(&body, &url);
        tracing::debug!(
            url = %url,
            manifests = found.manifests.len(),
            segments = found.segments.len(),
            "scanned manifest"
        );
        report.saved_manifests.push(path);

        for nested in found.manifests {
            if !manifest_admission.admit(&nested) {
                continue;
            }
            if manifests.len() >= opts.max_manifests {
                if !report.truncated {
                    tracing::warn!(
                        limit = opts.max_manifests,
                        "manifest limit reached; not following further playlists"
                    );
                }
                report.truncated = true;
                continue;
            }
            manifests.push(nested);
        }
        for segment in found.segments {
            if segment_admission.admit(&segment) {
                report.segments.push(segment);
            }
        }
    }

    report
}

fn record_manifest_failure(
    report: &mut CrawlReport,
    url: String,
    error: FetchError,
    events: Option<EventSink<'_>>,
) {
    if let Some(sink) = events {
        sink(&FetchEvent::ManifestFailed {
            url: &url,
            error: &error,
        });
    }
    report.failures.push(ResourceFailure { url, error });
}

/// Crawl then download every discovered segment.
pub fn fetch_all(
    request: &RequestSpec,
    fetcher: &dyn Fetcher,
    opts: &CrawlOptions,
    events: Option<EventSink<'_>>,
) -> FetchReport {
    let crawl = crawl_manifests(request, fetcher, opts, events);
    tracing::info!(
        manifests = crawl.saved_manifests.len(),
        manifest_failures = crawl.failures.len(),
        segments = crawl.segments.len(),
        "manifest discovery finished"
    );
    let segments = segments::download_segments(
        &crawl.segments,
        &request.headers,
        fetcher,
        opts,
        events,
    );
    FetchReport { crawl, segments }
}
