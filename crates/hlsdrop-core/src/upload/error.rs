//! Uploader errors: argument/credential validation (fatal) and per-file failures (recoverable).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("missing AWS access key id")]
    MissingAccessKeyId,
    #[error("missing AWS secret access key")]
    MissingSecretKey,
    #[error("missing source directory")]
    MissingSourceDirectory,
    #[error("missing bucket name")]
    MissingBucket,
    #[error("source is not a directory: {}", .0.display())]
    SourceNotADirectory(PathBuf),
    #[error("list {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Building the bucket client failed (bad region/endpoint/credentials format).
    #[error("bucket client: {0}")]
    Client(#[source] object_store::Error),
    /// The relative path is not a valid object key (e.g. a control character).
    #[error("invalid object key {key:?}: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: object_store::path::Error,
    },
    #[error("put failed: {0}")]
    Put(#[source] object_store::Error),
}
