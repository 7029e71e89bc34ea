//! `hlsdrop upload <source> <bucket> [key-id] [secret]` – upload a directory tree.

use anyhow::Result;
use hlsdrop_core::config::HlsdropConfig;
use hlsdrop_core::upload::{
    upload_directory, BucketSettings, S3Bucket, UploadFailure, UploadOptions, UploadRequest,
    UploadedObject,
};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct UploadArgs {
    pub source: PathBuf,
    pub bucket: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub prefix: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub jobs: Option<usize>,
}

/// Flags first, then the `[upload]` config section.
pub fn upload_options(cfg: &HlsdropConfig, args: &UploadArgs) -> (UploadOptions, BucketSettings) {
    let section = cfg.upload.clone().unwrap_or_default();
    let opts = UploadOptions {
        key_prefix: args.prefix.clone().or(section.key_prefix),
        jobs: args.jobs.unwrap_or(cfg.jobs).max(1),
    };
    let settings = BucketSettings {
        region: args.region.clone().or(section.region),
        endpoint: args.endpoint.clone().or(section.endpoint),
    };
    (opts, settings)
}

fn print_outcome(outcome: &Result<UploadedObject, UploadFailure>) {
    match outcome {
        Ok(obj) => println!("Uploaded {} to {}", obj.path.display(), obj.location),
        Err(f) => eprintln!("Failed to upload {}: {}", f.path.display(), f.error),
    }
}

pub async fn run_upload(cfg: &HlsdropConfig, args: UploadArgs) -> Result<()> {
    let (opts, settings) = upload_options(cfg, &args);
    let target = UploadRequest {
        source_dir: Some(args.source),
        bucket: Some(args.bucket),
        access_key_id: args.access_key_id,
        secret_access_key: args.secret_access_key,
    }
    .with_env_fallback()
    .validate()?;

    let bucket = S3Bucket::new(&target.bucket, &target.credentials, &settings)?;
    let report = upload_directory(&bucket, &target.source_dir, &opts, Some(&print_outcome)).await?;

    println!(
        "Done: {} uploaded, {} failed",
        report.uploaded.len(),
        report.failures.len()
    );
    Ok(())
}
