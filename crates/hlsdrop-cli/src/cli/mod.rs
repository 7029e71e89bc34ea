//! CLI for hlsdrop.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hlsdrop_core::config;
use std::path::PathBuf;

use commands::{run_fetch, run_upload, FetchArgs, UploadArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hlsdrop")]
#[command(
    about = "Fetch HLS manifest trees from captured requests; upload directories to S3",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a manifest, its nested manifests and all segments.
    ///
    /// Reads a "Copy as cURL" request for the master .m3u8 from stdin unless --request is given.
    Fetch {
        /// Directory to save into (default: `save_directory` from config).
        #[arg(long, short = 'o', value_name = "DIR")]
        out: Option<PathBuf>,

        /// Request description (cURL command). Read from stdin when omitted.
        #[arg(long, value_name = "CURL")]
        request: Option<String>,

        /// Fetch each manifest and segment URL at most once.
        #[arg(long)]
        dedup: bool,

        /// Download up to N segments concurrently.
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Upload every file under a directory to a bucket, keyed by relative path.
    Upload {
        /// Local directory to upload.
        source: PathBuf,

        /// Destination bucket name.
        bucket: String,

        /// Access key id (default: AWS_ACCESS_KEY_ID from the environment or .env).
        access_key_id: Option<String>,

        /// Secret access key (default: AWS_SECRET_ACCESS_KEY from the environment or .env).
        secret_access_key: Option<String>,

        /// Key prefix for every uploaded object.
        #[arg(long)]
        prefix: Option<String>,

        /// Bucket region (default: AWS_REGION).
        #[arg(long)]
        region: Option<String>,

        /// Custom endpoint for S3-compatible providers.
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Upload up to N files concurrently.
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                out,
                request,
                dedup,
                jobs,
            } => {
                run_fetch(
                    &cfg,
                    FetchArgs {
                        out,
                        request,
                        dedup,
                        jobs,
                    },
                )
                .await?
            }
            CliCommand::Upload {
                source,
                bucket,
                access_key_id,
                secret_access_key,
                prefix,
                region,
                endpoint,
                jobs,
            } => {
                run_upload(
                    &cfg,
                    UploadArgs {
                        source,
                        bucket,
                        access_key_id,
                        secret_access_key,
                        prefix,
                        region,
                        endpoint,
                        jobs,
                    },
                )
                .await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
