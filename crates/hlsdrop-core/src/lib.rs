//! hlsdrop core: fetch an HLS manifest tree described by a captured cURL
//! request, and upload local directories to an S3-compatible bucket.

pub mod config;
pub mod logging;

pub mod crawl;
pub mod fetch;
pub mod manifest;
pub mod request;
pub mod segments;
pub mod storage;
pub mod upload;
pub mod url_model;

pub use crawl::{crawl_manifests, fetch_all, CrawlOptions, FetchReport};
pub use request::{extract_request, RequestSpec};
