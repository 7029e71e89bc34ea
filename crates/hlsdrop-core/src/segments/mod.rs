//! Segment download phase.
//!
//! Streams every discovered segment to `<save_dir>/<basename>` with the same
//! headers used for the manifests. A failed segment is reported and skipped;
//! the batch always runs to the end.

mod pool;

use std::collections::HashMap;

use crate::crawl::{
    CrawlOptions, EventSink, FetchEvent, ResourceFailure, SavedSegment, SegmentReport,
};
use crate::fetch::Fetcher;
use crate::url_model;

/// Downloads `urls` (at most `opts.jobs` at once) and reports per-segment outcomes in input order.
pub fn download_segments(
    urls: &[String],
    headers: &HashMap<String, String>,
    fetcher: &dyn Fetcher,
    opts: &CrawlOptions,
    events: Option<EventSink<'_>>,
) -> SegmentReport {
    let outcomes = pool::run_bounded(urls.to_vec(), opts.jobs, |url| {
        let outcome = download_one(&url, headers, fetcher, opts);
        if let Some(sink) = events {
            match &outcome {
                Ok(saved) => sink(&FetchEvent::SegmentSaved {
                    url: &saved.url,
                    path: &saved.path,
                    bytes: saved.bytes,
                }),
                Err(failure) => sink(&FetchEvent::SegmentFailed {
                    url: &failure.url,
                    error: &failure.error,
                }),
            }
        }
        outcome
    });

    let mut report = SegmentReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(saved) => report.saved.push(saved),
            Err(failure) => report.failures.push(failure),
        }
    }
    tracing::info!(
        saved = report.saved.len(),
        failed = report.failures.len(),
        "segment downloads finished"
    );
    report
}

fn download_one(
    url: &str,
    headers: &HashMap<String, String>,
    fetcher: &dyn Fetcher,
    opts: &CrawlOptions,
) -> Result<SavedSegment, ResourceFailure> {
    let path = url_model::local_path(&opts.save_dir, url, &opts.default_manifest_name);
    match fetcher.download_to(url, headers, &path) {
        Ok(bytes) => {
            tracing::debug!(url = %url, path = %path.display(), bytes, "saved segment");
            Ok(SavedSegment {
                url: url.to_string(),
                path,
                bytes,
            })
        }
        Err(error) => {
            tracing::warn!(url = %url, error = %error, "segment download failed");
            Err(ResourceFailure {
                url: url.to_string(),
                error,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fake::MapFetcher;
    use crate::fetch::FetchError;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn failed_segment_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MapFetcher::new()
            .with("https://x.test/s0.ts", 200, "zero")
            .with("https://x.test/s1.ts", 404, "")
            .with("https://x.test/s2.ts", 200, "two");
        let opts = CrawlOptions::new(dir.path());

        let report = download_segments(
            &urls(&["https://x.test/s0.ts", "https://x.test/s1.ts", "https://x.test/s2.ts"]),
            &HashMap::new(),
            &fetcher,
            &opts,
            None,
        );

        assert_eq!(report.saved.len(), 2);
        assert_eq!(report.saved[0].bytes, 4);
        assert_eq!(report.saved[1].path, dir.path().join("s2.ts"));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].url, "https://x.test/s1.ts");
        assert!(matches!(report.failures[0].error, FetchError::Http(404)));
        assert!(!dir.path().join("s1.ts").exists());
        assert_eq!(std::fs::read(dir.path().join("s2.ts")).unwrap(), b"two");
    }

    #[test]
    fn parallel_downloads_save_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut fetcher = MapFetcher::new();
        let mut list = Vec::new();
        for i in 0..16 {
            let url = format!("https://x.test/v/seg{i}.ts?sig=1");
            fetcher = fetcher.with(&url, 200, &format!("body-{i}"));
            list.push(url);
        }
        let opts = CrawlOptions {
            jobs: 4,
            ..CrawlOptions::new(dir.path())
        };

        let report = download_segments(&list, &HashMap::new(), &fetcher, &opts, None);

        assert!(report.failures.is_empty());
        assert_eq!(report.saved.len(), 16);
        for (i, saved) in report.saved.iter().enumerate() {
            assert_eq!(saved.url, list[i]);
            assert_eq!(
                std::fs::read_to_string(dir.path().join(format!("seg{i}.ts"))).unwrap(),
                format!("body-{i}")
            );
        }
    }

    #[test]
    fn same_local_name_in_parallel_keeps_one_whole_body() {
        let dir = tempfile::tempdir().unwrap();
        let low = "A".repeat(64 * 1024);
        let high = "B".repeat(64 * 1024);
        let fetcher = MapFetcher::new()
            .with("https://x.test/lo/seg0.ts", 200, &low)
            .with("https://x.test/hi/seg0.ts", 200, &high);
        let opts = CrawlOptions {
            jobs: 2,
            ..CrawlOptions::new(dir.path())
        };

        let report = download_segments(
            &urls(&["https://x.test/lo/seg0.ts", "https://x.test/hi/seg0.ts"]),
            &HashMap::new(),
            &fetcher,
            &opts,
            None,
        );

        assert!(report.failures.is_empty());
        let saved = std::fs::read_to_string(dir.path().join("seg0.ts")).unwrap();
        assert!(saved == low || saved == high);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
