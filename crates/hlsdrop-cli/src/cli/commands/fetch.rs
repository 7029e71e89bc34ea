//! `hlsdrop fetch` – download a manifest tree described by a cURL command.

use anyhow::{Context, Result};
use hlsdrop_core::config::HlsdropConfig;
use hlsdrop_core::crawl::{fetch_all, CrawlOptions, FetchEvent};
use hlsdrop_core::fetch::{CurlFetcher, CurlOptions};
use hlsdrop_core::request::{extract_request_with_suffix, read_request_description};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct FetchArgs {
    pub out: Option<PathBuf>,
    pub request: Option<String>,
    pub dedup: bool,
    pub jobs: Option<usize>,
}

/// Config values overridden by flags.
pub fn crawl_options(cfg: &HlsdropConfig, args: &FetchArgs) -> CrawlOptions {
    let mut opts = CrawlOptions::from_config(cfg);
    if let Some(out) = &args.out {
        opts.save_dir = out.clone();
    }
    opts.dedup |= args.dedup;
    if let Some(jobs) = args.jobs {
        opts.jobs = jobs.max(1);
    }
    opts
}

fn print_event(event: &FetchEvent<'_>) {
    match event {
        FetchEvent::ManifestSaved { path, .. } => {
            println!("Saved manifest: {}", path.display())
        }
        FetchEvent::ManifestFailed { url, error } => eprintln!("Error fetching {url}: {error}"),
        FetchEvent::SegmentSaved { path, .. } => println!("Saved: {}", path.display()),
        FetchEvent::SegmentFailed { url, error } => {
            eprintln!("Failed to download {url}: {error}")
        }
    }
}

pub async fn run_fetch(cfg: &HlsdropConfig, args: FetchArgs) -> Result<()> {
    let description = match &args.request {
        Some(text) => text.clone(),
        None => {
            eprint!("Enter the cURL string for the master manifest: ");
            std::io::stderr().flush().ok();
            read_request_description(std::io::stdin().lock())?
        }
    };
    let request = extract_request_with_suffix(&description, &cfg.manifest_suffix)?;
    let opts = crawl_options(cfg, &args);
    let fetcher = CurlFetcher::new(CurlOptions {
        connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
        timeout: Duration::from_secs(cfg.timeout_secs),
    });
    tracing::info!(url = %request.url, save_dir = %opts.save_dir.display(), "fetch started");

    let report = tokio::task::spawn_blocking(move || {
        fetch_all(&request, &fetcher, &opts, Some(&print_event))
    })
    .await
    .context("fetch worker panicked")?;

    println!(
        "Done: {} manifest(s), {} segment(s) saved; {} failure(s)",
        report.crawl.saved_manifests.len(),
        report.segments.saved.len(),
        report.failure_count()
    );
    if report.crawl.truncated {
        println!("  (manifest limit reached; some playlists were not followed)");
    }
    Ok(())
}
