//! Outcome of a fetch run and the progress events emitted while it runs.

use std::path::{Path, PathBuf};

use crate::fetch::FetchError;

/// A single URL that could not be fetched or saved.
#[derive(Debug)]
pub struct ResourceFailure {
    pub url: String,
    pub error: FetchError,
}

/// Result of the manifest discovery phase.
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Local paths of saved manifests, in fetch order.
    pub saved_manifests: Vec<PathBuf>,
    pub failures: Vec<ResourceFailure>,
    /// Segment URLs discovered across all manifests, in first-seen order.
    pub segments: Vec<String>,
    /// True when `max_manifests` stopped further manifests from being queued.
    pub truncated: bool,
}

/// A segment written to disk.
#[derive(Debug, Clone)]
pub struct SavedSegment {
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Result of the segment download phase, ordered like the input URLs.
#[derive(Debug, Default)]
pub struct SegmentReport {
    pub saved: Vec<SavedSegment>,
    pub failures: Vec<ResourceFailure>,
}

/// Both phases of a run.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub crawl: CrawlReport,
    pub segments: SegmentReport,
}

impl FetchReport {
    pub fn failure_count(&self) -> usize {
        self.crawl.failures.len() + self.segments.failures.len()
    }
}

/// Emitted as each resource finishes.
#[derive(Debug)]
pub enum FetchEvent<'a> {
    ManifestSaved { url: &'a str, path: &'a Path },
    ManifestFailed { url: &'a str, error: &'a FetchError },
    SegmentSaved { url: &'a str, path: &'a Path, bytes: u64 },
    SegmentFailed { url: &'a str, error: &'a FetchError },
}

/// Observer for [`FetchEvent`]s; called from worker threads when `jobs > 1`.
pub type EventSink<'s> = &'s (dyn Fn(&FetchEvent<'_>) + Sync);
