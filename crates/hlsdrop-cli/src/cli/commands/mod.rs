//! CLI command handlers, one per file.

mod fetch;
mod upload;

pub use fetch::{crawl_options, run_fetch, FetchArgs};
pub use upload::{run_upload, upload_options, UploadArgs};
