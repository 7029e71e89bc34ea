//! Tests for the fetch subcommand.

use super::parse;
use crate::cli::commands::{crawl_options, FetchArgs};
use crate::cli::CliCommand;
use hlsdrop_core::config::HlsdropConfig;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["hlsdrop", "fetch"]) {
        CliCommand::Fetch {
            out,
            request,
            dedup,
            jobs,
        } => {
            assert!(out.is_none());
            assert!(request.is_none());
            assert!(!dedup);
            assert!(jobs.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_flags() {
    match parse(&[
        "hlsdrop",
        "fetch",
        "-o",
        "/tmp/hls",
        "--dedup",
        "--jobs",
        "4",
        "--request",
        "curl 'https://x.test/master.m3u8'",
    ]) {
        CliCommand::Fetch {
            out,
            request,
            dedup,
            jobs,
        } => {
            assert_eq!(out.as_deref(), Some(Path::new("/tmp/hls")));
            assert_eq!(request.as_deref(), Some("curl 'https://x.test/master.m3u8'"));
            assert!(dedup);
            assert_eq!(jobs, Some(4));
        }
        _ => panic!("expected Fetch with flags"),
    }
}

#[test]
fn flags_override_config() {
    let cfg = HlsdropConfig::default();
    let args = FetchArgs {
        out: Some(PathBuf::from("/data/out")),
        dedup: true,
        jobs: Some(0),
        ..FetchArgs::default()
    };
    let opts = crawl_options(&cfg, &args);
    assert_eq!(opts.save_dir, PathBuf::from("/data/out"));
    assert!(opts.dedup);
    assert_eq!(opts.jobs, 1);
}

#[test]
fn config_used_without_flags() {
    let cfg = HlsdropConfig {
        dedup: true,
        jobs: 3,
        ..HlsdropConfig::default()
    };
    let opts = crawl_options(&cfg, &FetchArgs::default());
    assert_eq!(opts.save_dir, PathBuf::from("downloads"));
    assert!(opts.dedup);
    assert_eq!(opts.jobs, 3);
}
