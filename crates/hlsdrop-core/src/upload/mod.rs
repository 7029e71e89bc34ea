//! Directory-to-bucket uploader.
//!
//! Validates arguments and credentials up front, walks the source directory
//! and puts every regular file under its relative path. A failed file is
//! reported and the walk continues.

mod bucket;
mod credentials;
mod error;
mod walk;

pub use bucket::{object_path, BucketSettings, ObjectSink, S3Bucket};
pub use credentials::{
    Credentials, UploadRequest, UploadTarget, ACCESS_KEY_ID_VAR, SECRET_ACCESS_KEY_VAR,
};
pub use error::UploadError;
pub use walk::{collect_files, object_key, LocalFile};

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};

/// Per-run upload knobs.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Prepended to every key (joined with `/`).
    pub key_prefix: Option<String>,
    /// Concurrent puts (1 = sequential).
    pub jobs: usize,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            key_prefix: None,
            jobs: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedObject {
    pub path: PathBuf,
    pub key: String,
    pub location: String,
}

#[derive(Debug)]
pub struct UploadFailure {
    pub path: PathBuf,
    pub key: String,
    pub error: UploadError,
}

/// Outcome of one directory upload, sorted by key.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<UploadedObject>,
    pub failures: Vec<UploadFailure>,
}

/// Observer called as each file finishes.
pub type UploadSink<'s> = &'s (dyn Fn(&Result<UploadedObject, UploadFailure>) + Sync);

/// Uploads every regular file under `source_dir` to `sink`.
///
/// Only an unreadable source root is an error; per-file read or put failures
/// end up in [`UploadReport::failures`].
///
/// Each file is read fully into memory before its single put, so up to
/// `opts.jobs` whole files are held at once. Large media trees should keep
/// `jobs` low.
pub async fn upload_directory(
    sink: &dyn ObjectSink,
    source_dir: &Path,
    opts: &UploadOptions,
    events: Option<UploadSink<'_>>,
) -> Result<UploadReport, UploadError> {
    let files = collect_files(source_dir, opts.key_prefix.as_deref())?;
    tracing::info!(
        source = %source_dir.display(),
        files = files.len(),
        "starting directory upload"
    );

    let outcomes: Vec<Result<UploadedObject, UploadFailure>> = stream::iter(files)
        .map(|file| async move {
            let outcome = upload_one(sink, file).await;
            if let Some(events) = events {
                events(&outcome);
            }
            outcome
        })
        .buffer_unordered(opts.jobs.max(1))
        .collect()
        .await;

    let mut report = UploadReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(obj) => report.uploaded.push(obj),
            Err(failure) => {
                tracing::warn!(
                    path = %failure.path.display(),
                    key = %failure.key,
                    error = %failure.error,
                    "upload failed"
                );
                report.failures.push(failure);
            }
        }
    }
    report.uploaded.sort_by(|a, b| a.key.cmp(&b.key));
    report.failures.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(report)
}

async fn upload_one(sink: &dyn ObjectSink, file: LocalFile) -> Result<UploadedObject, UploadFailure> {
    let LocalFile { path, key } = file;
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(source) => {
            return Err(UploadFailure {
                error: UploadError::Read {
                    path: path.clone(),
                    source,
                },
                path,
                key,
            })
        }
    };
    match sink.put_object(&key, data).await {
        Ok(()) => Ok(UploadedObject {
            location: sink.location(&key),
            path,
            key,
        }),
        Err(error) => Err(UploadFailure { path, key, error }),
    }
}
